//! One-shot commands for the `recipe-finder` binary.
//!
//! With no arguments the binary opens the interactive browser; the commands
//! below print their answer and exit.

use clap::{Parser, Subcommand};

use crate::error::FinderError;
use crate::finder::RecipeFinder;
use crate::model::RecipeSummary;

#[derive(Parser, Debug)]
#[command(name = "recipe-finder", version)]
#[command(about = "Pick ingredients and browse matching recipes from TheMealDB")]
pub struct Cli {
    // None opens the interactive browser
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List recipes using the given ingredients
    Search {
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Print the full recipe with the given id
    Show { id: String },
    /// List ingredient names starting with the given text
    Suggest {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Print a random recipe
    Surprise,
}

/// Run a one-shot command and return what should be printed.
pub async fn run(command: &Command, finder: &mut RecipeFinder) -> Result<String, FinderError> {
    match command {
        Command::Search { ingredients } => {
            for ingredient in ingredients {
                finder.add(ingredient);
            }
            finder.search().await?;

            let state = finder.state();
            if let Some(message) = state.error() {
                return Ok(message.to_string());
            }
            Ok(state
                .recipes()
                .iter()
                .map(|recipe| format!("{}\t{}", recipe.id, recipe.name))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Show { id } => {
            let summary = RecipeSummary {
                id: id.clone(),
                name: String::new(),
                thumbnail: String::new(),
            };
            finder.open(&summary).await?;
            Ok(detail_text(finder))
        }
        Command::Surprise => {
            finder.surprise().await?;
            Ok(detail_text(finder))
        }
        Command::Suggest { text } => {
            finder.load_ingredients().await?;
            finder.set_input(text.join(" "));
            Ok(finder.state().suggestions().join("\n"))
        }
    }
}

fn detail_text(finder: &RecipeFinder) -> String {
    finder
        .state()
        .detail()
        .map(|detail| detail.to_text())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Option<Command>, clap::Error> {
        Cli::try_parse_from(std::iter::once("recipe-finder").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_browses() {
        assert_eq!(parse(&[]).unwrap(), None);
    }

    #[test]
    fn test_parse_search() {
        assert_eq!(
            parse(&["search", "Chicken", "Garlic"]).unwrap(),
            Some(Command::Search {
                ingredients: strings(&["Chicken", "Garlic"])
            })
        );
    }

    #[test]
    fn test_parse_search_requires_ingredient() {
        let err = parse(&["search"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_parse_show() {
        assert_eq!(
            parse(&["show", "52772"]).unwrap(),
            Some(Command::Show {
                id: "52772".to_string()
            })
        );
        assert!(parse(&["show"]).is_err());
        assert!(parse(&["show", "1", "2"]).is_err());
    }

    #[test]
    fn test_parse_suggest_keeps_words() {
        assert_eq!(
            parse(&["suggest", "black", "pe"]).unwrap(),
            Some(Command::Suggest {
                text: strings(&["black", "pe"])
            })
        );
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse(&["surprise"]).unwrap(), Some(Command::Surprise));
        assert_eq!(
            parse(&["--help"]).unwrap_err().kind(),
            clap::error::ErrorKind::DisplayHelp
        );
        assert!(parse(&["bake"]).is_err());
    }
}
