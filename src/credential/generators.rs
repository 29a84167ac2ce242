//! 項目ごとのランダム値生成器
//!
//! 項目ID → 生成関数のテーブル。テーブルにない項目は DEFAULT_GENERATOR を使う。

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

pub type FieldGenerator = fn(&mut StdRng) -> String;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David", "Elizabeth",
    "Aiko", "Kenji", "Sofia", "Mateo", "Amara", "Lukas", "Priya", "Omar", "Chloe", "Noah",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Martinez", "Wilson",
    "Tanaka", "Sato", "Rossi", "Schmidt", "Okafor", "Nguyen", "Patel", "Haddad", "Dubois", "Kowalski",
];

const GENDERS: &[&str] = &["Female", "Male", "Non-binary"];

const COUNTRIES: &[&str] = &[
    "United States", "Canada", "United Kingdom", "Germany", "France", "Japan", "Australia", "Brazil",
    "India", "Nigeria", "Mexico", "Italy",
];

const NATIONALITIES: &[&str] = &[
    "American", "Canadian", "British", "German", "French", "Japanese", "Australian", "Brazilian",
    "Indian", "Nigerian", "Mexican", "Italian",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Franklin", "Greenville", "Fairview", "Madison", "Georgetown",
    "Salem", "Clinton", "Arlington",
];

const STREETS: &[&str] = &[
    "Main St", "Oak Ave", "Pine Rd", "Maple Dr", "Cedar Ln", "Elm St", "Lakeview Blvd", "Hillcrest Way",
];

const COMPANY_PREFIXES: &[&str] = &[
    "Summit", "Blue Ridge", "Northwind", "Apex", "Silverline", "Harbor", "Vertex", "Pioneer",
];

const COMPANY_SUFFIXES: &[&str] = &["Aviation", "Logistics", "Systems", "Holdings", "Group", "Labs", "Partners"];

const JOB_TITLES: &[&str] = &[
    "Flight Instructor", "Maintenance Technician", "Operations Manager", "Quality Inspector",
    "Software Engineer", "Dispatcher", "Safety Officer", "Project Coordinator",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "magna", "aliqua",
];

fn pick(rng: &mut StdRng, pool: &[&str]) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

fn digits(rng: &mut StdRng, count: usize) -> String {
    (0..count).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}

fn upper_letters(rng: &mut StdRng, count: usize) -> String {
    (0..count).map(|_| char::from(b'A' + rng.gen_range(0..26u8))).collect()
}

fn random_date(rng: &mut StdRng, from: (i32, u32, u32), span_days: i64) -> String {
    let start = NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap_or_default();
    let date = start + Duration::days(rng.gen_range(0..span_days));
    date.format("%Y-%m-%d").to_string()
}

fn full_name(rng: &mut StdRng) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

fn date_of_birth(rng: &mut StdRng) -> String {
    random_date(rng, (1955, 1, 1), 365 * 48)
}

fn gender(rng: &mut StdRng) -> String {
    pick(rng, GENDERS)
}

fn nationality(rng: &mut StdRng) -> String {
    pick(rng, NATIONALITIES)
}

fn notes(rng: &mut StdRng) -> String {
    let count = rng.gen_range(4..9);
    let words: Vec<String> = (0..count).map(|_| pick(rng, LOREM)).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

fn email(rng: &mut StdRng) -> String {
    format!(
        "{}.{}{}@{}",
        pick(rng, FIRST_NAMES).to_lowercase(),
        pick(rng, LAST_NAMES).to_lowercase(),
        digits(rng, 2),
        pick(rng, EMAIL_DOMAINS)
    )
}

fn phone(rng: &mut StdRng) -> String {
    format!("+1-{}-555-{}", digits(rng, 3), digits(rng, 4))
}

fn address(rng: &mut StdRng) -> String {
    format!("{} {}", rng.gen_range(10..9999), pick(rng, STREETS))
}

fn city(rng: &mut StdRng) -> String {
    pick(rng, CITIES)
}

fn country(rng: &mut StdRng) -> String {
    pick(rng, COUNTRIES)
}

fn organization(rng: &mut StdRng) -> String {
    format!("{} {}", pick(rng, COMPANY_PREFIXES), pick(rng, COMPANY_SUFFIXES))
}

fn job_title(rng: &mut StdRng) -> String {
    pick(rng, JOB_TITLES)
}

fn employee_id(rng: &mut StdRng) -> String {
    format!("EMP-{}", digits(rng, 6))
}

fn license_number(rng: &mut StdRng) -> String {
    format!("{}{}", upper_letters(rng, 2), digits(rng, 7))
}

fn issue_date(rng: &mut StdRng) -> String {
    random_date(rng, (2018, 1, 1), 365 * 6)
}

fn expiry_date(rng: &mut StdRng) -> String {
    random_date(rng, (2026, 1, 1), 365 * 6)
}

/// テーブルにない項目の生成器: 英数字8文字のトークン
pub fn default_generator(rng: &mut StdRng) -> String {
    format!("{}{}", upper_letters(rng, 3), digits(rng, 5))
}

pub const DEFAULT_GENERATOR: FieldGenerator = default_generator;

/// 項目ID → 生成器
pub fn generator_table() -> HashMap<&'static str, FieldGenerator> {
    let entries: [(&'static str, FieldGenerator); 16] = [
        ("full_name", full_name),
        ("date_of_birth", date_of_birth),
        ("gender", gender),
        ("nationality", nationality),
        ("notes", notes),
        ("email", email),
        ("phone", phone),
        ("address", address),
        ("city", city),
        ("country", country),
        ("organization", organization),
        ("job_title", job_title),
        ("employee_id", employee_id),
        ("license_number", license_number),
        ("issue_date", issue_date),
        ("expiry_date", expiry_date),
    ];
    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use logbook_audit_common::SECTIONS;
    use rand::SeedableRng;

    #[test]
    fn test_every_field_has_generator() {
        let table = generator_table();
        for section in SECTIONS {
            for field in section.fields {
                assert!(table.contains_key(field.id), "{} の生成器がない", field.id);
            }
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let table = generator_table();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for id in ["full_name", "email", "license_number", "issue_date"] {
            assert_eq!(table[id](&mut a), table[id](&mut b));
        }
    }

    #[test]
    fn test_generated_formats() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(employee_id(&mut rng).starts_with("EMP-"));
        assert_eq!(license_number(&mut rng).len(), 9);
        assert!(NaiveDate::parse_from_str(&date_of_birth(&mut rng), "%Y-%m-%d").is_ok());
        assert!(email(&mut rng).contains('@'));
        assert!(notes(&mut rng).ends_with('.'));

        let token = default_generator(&mut rng);
        assert_eq!(token.len(), 8);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
