use super::*;

// -----------------------------------------------------------------------
// parse_size_grams
// -----------------------------------------------------------------------

#[test]
fn size_grams_compact() {
    assert_eq!(parse_size_grams("Anchor Salted Butter 500g"), Some(500));
}

#[test]
fn size_grams_with_space() {
    assert_eq!(parse_size_grams("Lurpak 250 g block"), Some(250));
}

#[test]
fn size_grams_spelled_out() {
    assert_eq!(parse_size_grams("Kerrygold 454 grams"), Some(454));
}

#[test]
fn size_grams_case_insensitive() {
    assert_eq!(parse_size_grams("COUNTRY LIFE 250G"), Some(250));
}

#[test]
fn size_kilograms_multiplied() {
    assert_eq!(parse_size_grams("Catering butter 1kg"), Some(1000));
}

#[test]
fn size_decimal_kilograms() {
    assert_eq!(parse_size_grams("Value pack 1.5 kg"), Some(1500));
}

#[test]
fn size_leftmost_match_wins() {
    assert_eq!(parse_size_grams("250g (2 x 125g)"), Some(250));
}

#[test]
fn size_single_digit_grams_ignored() {
    assert!(parse_size_grams("5g portions").is_none());
}

#[test]
fn size_requires_unit_boundary() {
    assert!(parse_size_grams("500gold").is_none());
}

#[test]
fn size_absent_returns_none() {
    assert!(parse_size_grams("Anchor Spreadable").is_none());
}

// -----------------------------------------------------------------------
// classify_butter_type
// -----------------------------------------------------------------------

#[test]
fn type_unsalted_beats_salted_substring() {
    assert_eq!(
        classify_butter_type("Unsalted Butter"),
        Some(ButterType::Unsalted)
    );
}

#[test]
fn type_lightly_salted_with_space() {
    assert_eq!(
        classify_butter_type("Lurpak Lightly Salted 250g"),
        Some(ButterType::LightlySalted)
    );
}

#[test]
fn type_lightly_salted_slug_style() {
    assert_eq!(
        classify_butter_type("lightly_salted"),
        Some(ButterType::LightlySalted)
    );
    assert_eq!(
        classify_butter_type("lightly-salted"),
        Some(ButterType::LightlySalted)
    );
}

#[test]
fn type_salted() {
    assert_eq!(classify_butter_type("SALTED"), Some(ButterType::Salted));
}

#[test]
fn type_unsalted_wins_when_both_present() {
    assert_eq!(
        classify_butter_type("Salted or unsalted, 2 pack"),
        Some(ButterType::Unsalted)
    );
}

#[test]
fn type_none_when_absent() {
    assert!(classify_butter_type("Spreadable 500g").is_none());
}

// -----------------------------------------------------------------------
// leading_brand
// -----------------------------------------------------------------------

#[test]
fn brand_single_word() {
    assert_eq!(
        leading_brand("Anchor Salted Butter 500g").as_deref(),
        Some("Anchor")
    );
}

#[test]
fn brand_multi_word() {
    assert_eq!(
        leading_brand("Country Life Unsalted Butter 250g").as_deref(),
        Some("Country Life")
    );
}

#[test]
fn brand_stops_at_digit_token() {
    assert_eq!(leading_brand("Kerrygold 227g").as_deref(), Some("Kerrygold"));
}

#[test]
fn brand_stops_at_dash() {
    assert_eq!(
        leading_brand("Anchor - Spreadable").as_deref(),
        Some("Anchor")
    );
}

#[test]
fn brand_capped_at_three_words() {
    assert_eq!(
        leading_brand("Yeo Valley Organic Farmhouse").as_deref(),
        Some("Yeo Valley Organic")
    );
}

#[test]
fn brand_keeps_source_casing() {
    assert_eq!(leading_brand("LURPAK butter").as_deref(), Some("LURPAK"));
}

#[test]
fn brand_none_when_name_starts_with_descriptor() {
    assert!(leading_brand("Salted Butter 250g").is_none());
}

#[test]
fn brand_none_for_blank() {
    assert!(leading_brand("   ").is_none());
}

// -----------------------------------------------------------------------
// parse_price_text / grams_from_f64
// -----------------------------------------------------------------------

#[test]
fn price_with_currency_symbol() {
    assert_eq!(parse_price_text("£2.50"), Some(2.5));
}

#[test]
fn price_with_decimal_comma() {
    assert_eq!(parse_price_text("2,50 €"), Some(2.5));
}

#[test]
fn price_with_thousands_separator() {
    assert_eq!(parse_price_text("£1,234.56"), Some(1234.56));
    assert_eq!(parse_price_text("1,234,567.00"), Some(1_234_567.0));
}

#[test]
fn price_in_pence() {
    assert_eq!(parse_price_text("85p"), Some(0.85));
}

#[test]
fn price_none_without_digits() {
    assert!(parse_price_text("n/a").is_none());
}

#[test]
fn grams_rounds_to_nearest() {
    assert_eq!(grams_from_f64(249.6), Some(250));
}

#[test]
fn grams_rejects_non_positive_and_nan() {
    assert!(grams_from_f64(0.0).is_none());
    assert!(grams_from_f64(-5.0).is_none());
    assert!(grams_from_f64(f64::NAN).is_none());
}
