//! Record validation: normalizes and checks inbound create payloads
//! before an identifier or timestamp is ever assigned. Failures name the
//! offending field so clients can point at the right input.

use email_address::EmailAddress;

use crate::db::models::{ContactCreate, NewsletterCreate, PortfolioCreate};
use crate::error::ApiError;

fn require(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation {
            field,
            reason: "must be a non-empty string",
        });
    }
    Ok(())
}

fn require_email(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.parse::<EmailAddress>().is_err() {
        return Err(ApiError::Validation {
            field,
            reason: "must be a valid email address",
        });
    }
    Ok(())
}

pub fn contact(input: &ContactCreate) -> Result<(), ApiError> {
    require("name", &input.name)?;
    require_email("email", &input.email)?;
    require("message", &input.message)?;
    Ok(())
}

pub fn newsletter(input: &NewsletterCreate) -> Result<(), ApiError> {
    require_email("email", &input.email)
}

pub fn portfolio(input: &PortfolioCreate) -> Result<(), ApiError> {
    require("title", &input.title)?;
    require("description", &input.description)?;
    require("category", &input.category)?;
    require("image", &input.image)?;
    if input.technologies.is_empty() {
        return Err(ApiError::Validation {
            field: "technologies",
            reason: "must be a non-empty list of strings",
        });
    }
    for technology in &input.technologies {
        require("technologies", technology)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_contact() -> ContactCreate {
        ContactCreate {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+44 20 7946 0000".to_string()),
            service: None,
            message: "I'd like a website.".to_string(),
        }
    }

    fn valid_portfolio() -> PortfolioCreate {
        PortfolioCreate {
            title: "TechCorp Enterprise Platform".to_string(),
            description: "Enterprise platform build".to_string(),
            category: "Web Development".to_string(),
            image: "https://example.com/shot.png".to_string(),
            technologies: vec!["React".to_string(), "Rust".to_string()],
            link: None,
            client: None,
            duration: None,
        }
    }

    fn offending_field(result: Result<(), ApiError>) -> &'static str {
        match result {
            Err(ApiError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_contact_passes() {
        assert!(contact(&valid_contact()).is_ok());
    }

    #[test]
    fn test_contact_rejects_empty_name() {
        let mut input = valid_contact();
        input.name = "   ".to_string();
        assert_eq!(offending_field(contact(&input)), "name");
    }

    #[test]
    fn test_contact_rejects_bad_email() {
        for bad in ["", "no-at-sign", "two@@example.com", "@example.com"] {
            let mut input = valid_contact();
            input.email = bad.to_string();
            assert_eq!(offending_field(contact(&input)), "email");
        }
    }

    #[test]
    fn test_contact_rejects_empty_message() {
        let mut input = valid_contact();
        input.message = String::new();
        assert_eq!(offending_field(contact(&input)), "message");
    }

    #[test]
    fn test_contact_optionals_may_be_absent() {
        let mut input = valid_contact();
        input.phone = None;
        input.service = None;
        assert!(contact(&input).is_ok());
    }

    #[test]
    fn test_newsletter_rejects_bad_email() {
        let input = NewsletterCreate {
            email: "not-an-address".to_string(),
        };
        assert_eq!(offending_field(newsletter(&input)), "email");
    }

    #[test]
    fn test_valid_portfolio_passes() {
        assert!(portfolio(&valid_portfolio()).is_ok());
    }

    #[test]
    fn test_portfolio_rejects_empty_required_strings() {
        let cases: Vec<(&str, fn(&mut PortfolioCreate))> = vec![
            ("title", |p| p.title = String::new()),
            ("description", |p| p.description = String::new()),
            ("category", |p| p.category = String::new()),
            ("image", |p| p.image = String::new()),
        ];
        for (field, set) in cases {
            let mut input = valid_portfolio();
            set(&mut input);
            assert_eq!(offending_field(portfolio(&input)), field);
        }
    }

    #[test]
    fn test_portfolio_rejects_empty_technologies() {
        let mut input = valid_portfolio();
        input.technologies.clear();
        assert_eq!(offending_field(portfolio(&input)), "technologies");

        let mut input = valid_portfolio();
        input.technologies = vec!["".to_string()];
        assert_eq!(offending_field(portfolio(&input)), "technologies");
    }
}
