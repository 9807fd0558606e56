use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use islands_core::{IslandsError, SocialNetwork, TrendQuery, UserFilter, UserPredicate};
use islands_types::UserField;

/// Interactive filter selection over any line-based input and output.
///
/// Unparseable numbers and out-of-range choices fail with
/// [`IslandsError::InvalidInput`]; nothing is re-prompted.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for a filter mode and fill in the matching part of `base`
    pub fn read_query(&mut self, network: &SocialNetwork, base: TrendQuery) -> Result<TrendQuery> {
        writeln!(self.output, "\nFilter options:")?;
        writeln!(self.output, "0. No filter")?;
        writeln!(self.output, "1. Include keyword")?;
        writeln!(self.output, "2. Exclude keyword")?;
        writeln!(self.output, "3. Filter by user attribute")?;

        let query = match self.ask_number("Select filter option: ")? {
            0 => base,
            1 => base.include(self.ask("Enter keyword to include: ")?),
            2 => base.exclude(self.ask("Enter keyword to exclude: ")?),
            3 => base.with_user_filter(self.read_user_filter(network)?),
            other => return Err(invalid(format!("no filter option {}", other))),
        };

        tracing::debug!(?query, "Filter selected");
        Ok(query)
    }

    fn read_user_filter(&mut self, network: &SocialNetwork) -> Result<UserFilter> {
        writeln!(self.output, "\nFilter by user attribute:")?;
        writeln!(self.output, "0. No filter")?;
        writeln!(self.output, "1. Gender")?;
        writeln!(self.output, "2. Age")?;
        writeln!(self.output, "3. Location")?;

        let predicate = match self.ask_number("Select an option: ")? {
            0 => return Ok(UserFilter::new()),
            1 => {
                let genders = network.attribute_values(UserField::Gender);
                let gender = self.choose("Available genders", "Select gender: ", &genders)?;
                UserPredicate::equals(UserField::Gender, gender)?
            }
            2 => {
                let ages = network.attribute_values(UserField::Age);
                self.list("Available ages", &ages)?;
                let min = self.ask_age("\nEnter minimum age: ")?;
                let max = self.ask_age("Enter maximum age: ")?;
                UserPredicate::age_between(min, max).map_err(|e| invalid(e.to_string()))?
            }
            3 => {
                let locations = network.attribute_values(UserField::Location);
                let location = self.choose("Available locations", "Select location: ", &locations)?;
                UserPredicate::equals(UserField::Location, location)?
            }
            other => return Err(invalid(format!("no attribute option {}", other))),
        };

        Ok(UserFilter::new().with(predicate))
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read user input")?;
        if read == 0 {
            return Err(invalid("input ended".to_string()));
        }
        Ok(line.trim().to_string())
    }

    fn ask_number(&mut self, prompt: &str) -> Result<usize> {
        let answer = self.ask(prompt)?;
        answer
            .parse()
            .map_err(|_| invalid(format!("'{}' is not a number", answer)))
    }

    fn ask_age(&mut self, prompt: &str) -> Result<i64> {
        let answer = self.ask(prompt)?;
        answer
            .parse()
            .map_err(|_| invalid(format!("'{}' is not an age", answer)))
    }

    fn list(&mut self, title: &str, values: &[String]) -> Result<()> {
        writeln!(self.output, "\n{}:", title)?;
        for (index, value) in values.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, value)?;
        }
        Ok(())
    }

    /// Numbered menu over `values`, 1-based
    fn choose(&mut self, title: &str, prompt: &str, values: &[String]) -> Result<String> {
        self.list(title, values)?;
        let choice = self.ask_number(prompt)?;
        choice
            .checked_sub(1)
            .and_then(|index| values.get(index))
            .cloned()
            .ok_or_else(|| invalid(format!("no choice {}", choice)))
    }
}

fn invalid(message: String) -> anyhow::Error {
    IslandsError::InvalidInput(message).into()
}

/// True when the error chain carries an [`IslandsError::InvalidInput`]
pub fn is_invalid_input(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<IslandsError>(),
            Some(IslandsError::InvalidInput(_))
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use islands_core::Database;
    use std::io::Cursor;

    fn seeded_network() -> SocialNetwork {
        let db = Database::in_memory().unwrap();
        db.ensure_schema().unwrap();
        SocialNetwork::load(&db).unwrap()
    }

    fn run(input: &str) -> (Result<TrendQuery>, String) {
        let network = seeded_network();
        let mut output = Vec::new();
        let result = Prompter::new(Cursor::new(input.as_bytes()), &mut output)
            .read_query(&network, TrendQuery::default());
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_no_filter() {
        let (query, _) = run("0\n");
        assert_eq!(query.unwrap(), TrendQuery::default());
    }

    #[test]
    fn test_include_keyword() {
        let (query, output) = run("1\ndoctor\n");
        assert_eq!(query.unwrap().include_keyword.as_deref(), Some("doctor"));
        assert!(output.contains("Enter keyword to include: "));
    }

    #[test]
    fn test_exclude_keyword() {
        let (query, _) = run("2\n  music \n");
        assert_eq!(query.unwrap().exclude_keyword.as_deref(), Some("music"));
    }

    #[test]
    fn test_gender_menu_lists_live_values() {
        // Genders are listed sorted: 1. Female, 2. Male
        let (query, output) = run("3\n1\n1\n");
        assert!(output.contains("1. Female"));
        assert!(output.contains("2. Male"));

        let query = query.unwrap();
        assert_eq!(
            query.user_filter.predicates(),
            &[UserPredicate::Equals {
                field: UserField::Gender,
                value: "Female".to_string()
            }]
        );
    }

    #[test]
    fn test_age_range() {
        let (query, _) = run("3\n2\n20\n40\n");
        assert_eq!(
            query.unwrap().user_filter.predicates(),
            &[UserPredicate::AgeBetween { min: 20, max: 40 }]
        );
    }

    #[test]
    fn test_location_menu() {
        let (query, _) = run("3\n3\n8\n");
        assert_eq!(
            query.unwrap().user_filter.predicates(),
            &[UserPredicate::Equals {
                field: UserField::Location,
                value: "USA".to_string()
            }]
        );
    }

    #[test]
    fn test_invalid_inputs() {
        for input in ["abc\n", "7\n", "3\n1\n9\n", "3\n1\n0\n", "3\n2\nten\n", "3\n2\n50\n20\n", ""] {
            let (query, _) = run(input);
            let err = query.expect_err(input);
            assert!(is_invalid_input(&err), "input {:?} gave {:#}", input, err);
        }
    }
}
