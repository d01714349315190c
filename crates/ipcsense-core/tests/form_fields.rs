//! Form-field extraction on realistic submissions

use ipcsense_core::{extract_case_description, extract_crime_type, normalize};

const FIR_INPUT: &str = "
Crime Type: Vehicle Theft
Incident Description: My scooter was taken from outside the market
Location: Karol Bagh, Delhi
Date and Time: 2024-02-11 19:00
Suspect Details: Unknown
Witness Information: Shopkeeper
";

#[test]
fn test_inline_form() {
    let text = "Crime Type: Theft Location: Delhi Case Description: The man stole a phone";
    assert_eq!(extract_case_description(text), "The man stole a phone");
    assert_eq!(extract_crime_type(text).as_deref(), Some("Theft"));
}

#[test]
fn test_multiline_form_without_description_marker() {
    assert_eq!(extract_case_description(FIR_INPUT), FIR_INPUT);
    assert_eq!(extract_crime_type(FIR_INPUT).as_deref(), Some("Vehicle Theft"));
}

#[test]
fn test_marker_with_blank_remainder_keeps_original() {
    let text = "Crime Type: Theft\nCase Description:   ";
    assert_eq!(extract_case_description(text), text);
}

#[test]
fn test_unterminated_crime_type_is_absent() {
    assert_eq!(extract_crime_type("Crime Type: Theft"), None);
    assert_eq!(extract_crime_type("Crime Type: \nLocation: Goa"), None);
}

#[test]
fn test_description_normalizes_for_matching() {
    let text = "Case Description: Person-A stole Rs. 5,000 from Person B's wallet!";
    assert_eq!(
        normalize(extract_case_description(text)),
        "person a stole rs from person b s wallet"
    );
}
