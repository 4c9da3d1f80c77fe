use habitkit_core::{Event, EventValidationError};
use uuid::Uuid;

#[test]
fn new_event_sets_defaults() {
    let event = Event::new("Dentist", "2024-06-10");

    assert!(!event.id.is_nil());
    assert_eq!(event.title, "Dentist");
    assert_eq!(event.date, "2024-06-10");
    assert_eq!(event.time, None);
    assert_eq!(event.description, None);
}

#[test]
fn validate_rejects_blank_title_and_malformed_date() {
    let blank = Event::new("   ", "2024-06-10");
    assert_eq!(blank.validate(), Err(EventValidationError::EmptyTitle));

    let bad_date = Event::new("Dentist", "10.06.2024");
    assert_eq!(
        bad_date.validate(),
        Err(EventValidationError::InvalidDate("10.06.2024".to_string()))
    );
}

#[test]
fn optional_fields_are_omitted_from_the_wire_when_absent() {
    let mut event = Event::new("Dentist", "2024-06-10");
    event.id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["title"], "Dentist");
    assert_eq!(json["date"], "2024-06-10");
    assert!(json.get("time").is_none());
    assert!(json.get("description").is_none());

    event.time = Some("14:30".to_string());
    event.description = Some("bring referral".to_string());
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["time"], "14:30");
    assert_eq!(json["description"], "bring referral");

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn deserialization_tolerates_missing_optional_fields() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Standup",
        "date": "2024-06-11"
    });

    let event: Event = serde_json::from_value(value).unwrap();
    assert_eq!(event.title, "Standup");
    assert_eq!(event.time, None);
    assert_eq!(event.description, None);
}
