//! The `lexilearn listen` command.

use anyhow::Result;

use lexilearn_core::discrimination::{builtin_pairs, DiscriminationGame, Judgement};
use lexilearn_core::traits::SpeechRecognizer;
use lexilearn_providers::speech::{NoRecognizer, ScriptedRecognizer};

use crate::commands::into_notice;

pub async fn execute(transcripts: Vec<String>) -> Result<()> {
    let Some(mut game) = DiscriminationGame::new(builtin_pairs()) else {
        anyhow::bail!("no letter pairs to practise");
    };

    let attempts = transcripts.len().max(1);
    let recognizer: Box<dyn SpeechRecognizer> = if transcripts.is_empty() {
        Box::new(NoRecognizer)
    } else {
        Box::new(ScriptedRecognizer::new(transcripts))
    };

    for _ in 0..attempts {
        let pair = game.current().clone();
        println!(
            "Say \"{}\"  ({} / {})",
            pair.answer, pair.options[0], pair.options[1]
        );
        match game.listen(recognizer.as_ref()).await.map_err(into_notice)? {
            Judgement::Correct => println!("  Correct! That's \"{}\".", pair.answer),
            Judgement::HeardOther(other) => {
                println!("  I heard \"{other}\". Try saying \"{}\".", pair.answer)
            }
            Judgement::Unrecognized => println!("  I didn't catch that. Try again."),
        }
    }

    println!("Correct: {}/{attempts}", game.correct());
    Ok(())
}
