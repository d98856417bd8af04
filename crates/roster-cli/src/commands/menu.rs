//! The interactive menu.
//!
//! Options 3 to 6 only appear once someone is registered. End of input at
//! any prompt quits cleanly.

use std::io::BufRead;

use anyhow::Result;

use roster_core::config::RosterConfig;
use roster_core::{QuizEngine, QuizError, RegistryStore};

use super::{people, prompt, quiz, scores, stats};

fn print_menu(store: &RegistryStore) {
    println!("\n===== MENU =====");
    println!("1. Register student");
    println!("2. Register teacher");
    if store.has_people() {
        println!("3. List all");
        println!("4. Start quiz");
        println!("5. Score history");
        println!("6. Statistics and chart");
    }
    println!("0. Quit");
}

/// Prompts for several fields in turn; `None` if input ends part-way.
fn prompt_fields<const N: usize>(
    input: &mut dyn BufRead,
    labels: [&str; N],
) -> Result<Option<[String; N]>> {
    let mut values: [String; N] = std::array::from_fn(|_| String::new());
    for (value, label) in values.iter_mut().zip(labels) {
        match prompt(input, label)? {
            Some(line) => *value = line.trim().to_string(),
            None => return Ok(None),
        }
    }
    Ok(Some(values))
}

pub fn execute(
    config: &RosterConfig,
    engine: &mut QuizEngine,
    store: &mut RegistryStore,
    input: &mut dyn BufRead,
) -> Result<()> {
    loop {
        print_menu(store);
        let Some(choice) = prompt(input, "Choose an option: ")? else {
            println!();
            break;
        };

        match choice.trim() {
            "1" => {
                let Some([name, email, matricula]) =
                    prompt_fields(input, ["Name: ", "Email: ", "Enrollment number: "])?
                else {
                    break;
                };
                people::add_student(store, &name, &email, &matricula)?;
            }
            "2" => {
                let Some([name, email, subject]) =
                    prompt_fields(input, ["Name: ", "Email: ", "Subject: "])?
                else {
                    break;
                };
                people::add_teacher(store, &name, &email, &subject)?;
            }
            "3" => people::list_all(store),
            "4" => {
                if !store.has_students() {
                    println!("No students registered to start the quiz.");
                    continue;
                }
                let Some([name]) = prompt_fields(input, ["Student name: "])? else {
                    break;
                };
                if let Err(e) = quiz::execute(engine, store, input, &name) {
                    // A closed input aborts only the quiz; store failures stay fatal.
                    match e.downcast_ref::<QuizError>() {
                        Some(QuizError::Input(reason)) => {
                            tracing::warn!("quiz aborted: {reason}");
                            println!("\nQuiz aborted: {reason}");
                        }
                        _ => return Err(e),
                    }
                }
            }
            "5" => {
                if store.has_students() {
                    scores::show_history(store);
                } else {
                    println!("Register a student first to have a score history.");
                }
            }
            "6" => stats::execute(store, &config.chart_path())?,
            "0" => {
                println!("Shutting down...");
                break;
            }
            _ => println!("Invalid option."),
        }
    }
    tracing::debug!("menu closed");
    Ok(())
}
