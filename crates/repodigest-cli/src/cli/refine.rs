//! Interactive refinement runner.
//!
//! Runs the full analysis, prints the synthesized answer, then loops:
//! read a line, send it with the accumulated transcript, print the reply.
//! The literal input `bye` ends the loop; so does Ctrl+D.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use repodigest_core::prompt::AggregationFormat;
use repodigest_core::refine::{Outcome, RefinementLoop};

use super::analyze::run_analysis;
use super::input::{InputEvent, RefineInput};
use super::AnalyzeArgs;

pub async fn run(args: &AnalyzeArgs) -> anyhow::Result<()> {
    let output = run_analysis(args, AggregationFormat::ProblemStatement).await?;

    println!();
    println!("{}", output.answer);
    println!();
    print_nudge();

    let mut refinement = RefinementLoop::new(output.opts, output.answer);
    tracing::debug!(session = %refinement.session_id(), "refinement session started");

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut input, _writer) = RefineInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        match input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D or enter 'bye' to exit.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                let spinner = ProgressBar::new_spinner();
                if let Ok(spinner_style) =
                    ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
                {
                    spinner.set_style(spinner_style);
                }
                spinner.set_message("thinking...");
                spinner.enable_steady_tick(Duration::from_millis(80));

                let outcome = refinement.handle_input(&output.provider, &text).await;
                spinner.finish_and_clear();

                match outcome? {
                    Outcome::Terminated => {
                        println!("\n  {}", style("Session ended.").dim());
                        break;
                    }
                    Outcome::Reply(reply) => {
                        println!();
                        println!("{reply}");
                        println!();
                        print_nudge();
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_nudge() {
    println!(
        "  {}",
        style("If you are happy with the answer enter 'bye', otherwise keep asking for clarification.")
            .dim()
    );
}
