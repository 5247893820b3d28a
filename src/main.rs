use offbeat::widget::TYPING_INDICATOR;
use offbeat::{ChatWidget, Config, Renderer};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

fn load_dotenv() {
    // A missing .env is fine; real env vars still apply.
    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!(error = %err, "no .env loaded");
    }
}

/// Terminal stand-in for the chat panel.
struct Terminal;

impl Renderer for Terminal {
    fn render_user(&mut self, text: &str) {
        println!("you> {text}");
    }

    fn render_assistant(&mut self, text: &str) {
        println!("assistant> {text}\n");
    }

    fn show_typing(&mut self) {
        print!("{TYPING_INDICATOR}");
        let _ = std::io::stdout().flush();
    }

    fn clear_typing(&mut self) {
        print!("\r{}\r", " ".repeat(TYPING_INDICATOR.len()));
        let _ = std::io::stdout().flush();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    load_dotenv();

    let config = Config::from_env()?;
    tracing::info!(model = %config.model, rentals = ?config.rentals, "starting offbeat assistant");

    let mut widget = ChatWidget::new(config.build_manager(), Terminal);
    widget.toggle();
    println!("Offbeat Assistant is ready. Type a message, /toggle to open or close the panel, Ctrl-D to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/toggle" {
            let open = widget.toggle();
            println!("[chat panel {}]", if open { "opened" } else { "closed" });
            continue;
        }
        if !widget.is_open() {
            println!("[chat panel is closed, /toggle to open it]");
            continue;
        }
        widget.submit(&line).await;
    }

    Ok(())
}
