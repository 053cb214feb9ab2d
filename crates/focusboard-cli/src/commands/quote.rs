use focusboard_core::widgets::random_quote;

use super::CmdResult;

pub fn run() -> CmdResult {
    let quote = random_quote(&mut rand::thread_rng());
    println!("{quote}");
    Ok(())
}
