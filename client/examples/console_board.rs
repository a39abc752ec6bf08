use quizboard_client::{Category, GameEvent, QuizBoard, RevealState};

#[tokio::main]
async fn main() -> quizboard_client::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let game = QuizBoard::connect("https://jservice.io/")?;
    let mut events = game.subscribe_to_events().await;

    println!("Fetching a fresh board...");
    game.start_game().await?;

    // Drain setup events
    while let Ok(event) = events.try_recv() {
        match event {
            GameEvent::SetupStarted => println!("⏳ Loading..."),
            GameEvent::BoardReady { categories } => {
                println!("🎲 Board ready with {} categories", categories.len());
            }
            GameEvent::SetupFailed { reason } => {
                println!("❌ Failed to load game: {reason}");
                return Ok(());
            }
            GameEvent::ClueRevealed { .. } => {}
        }
    }

    if let Some(board) = game.board().await {
        display_board(&board);
    }

    // Walk one cell through its full reveal: question, answer, then a
    // click that is ignored.
    println!("\nClicking cell 0...");
    if let Some(reveal) = game.click(0).await? {
        println!("❓ {}", reveal.text);
    }

    println!("Clicking cell 0 again...");
    if let Some(reveal) = game.click(0).await? {
        println!("💡 {}", reveal.text);
    }

    println!("Clicking cell 0 a third time...");
    match game.click(0).await? {
        Some(_) => println!("unexpected reveal"),
        None => println!("(nothing happens, answer stays up)"),
    }

    game.teardown().await;
    println!("\nGame over");

    Ok(())
}

fn display_board(board: &[Category]) {
    println!("\nBoard:");
    for category in board {
        print!("{:>24.24} |", category.title);
        for clue in &category.clues {
            let symbol = match clue.showing {
                RevealState::Unrevealed => format!("{:>4}", clue.points()),
                RevealState::QuestionShown => "  ❓".to_string(),
                RevealState::AnswerShown => "  💡".to_string(),
            };
            print!("{symbol}");
        }
        println!();
    }
}
