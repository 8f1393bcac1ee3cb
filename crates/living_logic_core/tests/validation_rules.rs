use living_logic_core::validation::rules;
use regex::Regex;

const SAMPLES: &[&str] = &[
    "",
    " ",
    "a@b.c",
    "a@b.com",
    "A@B.COM",
    "first.last@example.co.uk",
    "no-at-sign.com",
    "two@@signs.com",
    "a@b",
    "@b.com",
    "a@.com",
    "a@b.",
    "a @b.com",
    "a@b .com",
    "a@b.com\n",
    "\ta@b.com",
    "ünï@cødé.org",
    "x@y.z.w",
    "a@b@c.com",
];

#[test]
fn email_check_matches_reference_pattern() {
    let pattern = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    for sample in SAMPLES {
        assert_eq!(
            rules::email(sample).is_none(),
            pattern.is_match(sample),
            "disagreement on {sample:?}"
        );
    }
}

#[test]
fn signup_password_requires_length_and_each_class() {
    let cases = [
        ("Abcdef12", true),
        ("Abcdefg1", true),
        ("AAAAaaa1", true),
        ("Abcdef1", false),
        ("abcdefg1", false),
        ("ABCDEFG1", false),
        ("Abcdefgh", false),
        ("12345678", false),
        ("Ab1!@#$%^", true),
        ("Àbcdefg1", false),
    ];
    for (value, expected) in cases {
        let has_len = value.chars().count() >= 8;
        let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = value.chars().any(|c| c.is_ascii_digit());
        assert_eq!(has_len && has_upper && has_lower && has_digit, expected);
        assert_eq!(
            rules::signup_password(value).is_none(),
            expected,
            "unexpected verdict for {value:?}"
        );
    }
}

#[test]
fn documented_examples_hold() {
    assert_eq!(rules::phone("(555) 123-4567"), None);
    assert_eq!(
        rules::message("hi"),
        Some("Message must be at least 10 characters long")
    );
}
