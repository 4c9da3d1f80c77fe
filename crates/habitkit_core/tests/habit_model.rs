use habitkit_core::{Habit, HabitValidationError};
use uuid::Uuid;

#[test]
fn new_habit_sets_defaults() {
    let habit = Habit::new("Drink water", "#FF6B6B", 1_700_000_000_000);

    assert!(!habit.id.is_nil());
    assert_eq!(habit.name, "Drink water");
    assert_eq!(habit.color, "#FF6B6B");
    assert!(habit.completions.is_empty());
    assert_eq!(habit.created_at, 1_700_000_000_000);
}

#[test]
fn toggle_is_its_own_inverse() {
    let mut habit = Habit::new("Stretch", "#48D1CC", 0);
    habit.completions.insert("2024-04-30".to_string(), true);

    habit.toggle_completion("2024-05-01");
    assert!(habit.is_completed_on("2024-05-01"));

    habit.toggle_completion("2024-05-01");
    assert!(!habit.is_completed_on("2024-05-01"));
    // Other dates stay untouched through both flips.
    assert!(habit.is_completed_on("2024-04-30"));
}

#[test]
fn toggle_resurrects_explicit_false_entry() {
    let mut habit = Habit::new("Read", "#9370DB", 0);
    habit.completions.insert("2024-05-01".to_string(), false);

    habit.toggle_completion("2024-05-01");
    assert_eq!(habit.completions.get("2024-05-01"), Some(&true));
}

#[test]
fn completed_days_counts_only_true_entries() {
    let mut habit = Habit::new("Run", "#FFA500", 0);
    habit.completions.insert("2024-05-01".to_string(), true);
    habit.completions.insert("2024-05-02".to_string(), false);
    habit.completions.insert("2024-05-03".to_string(), true);

    assert_eq!(habit.completed_days(), 2);
}

#[test]
fn validate_rejects_empty_and_whitespace_names() {
    let empty = Habit::new("", "#20B2AA", 0);
    assert_eq!(empty.validate(), Err(HabitValidationError::EmptyName));

    let blank = Habit::new("   ", "#20B2AA", 0);
    assert_eq!(blank.validate(), Err(HabitValidationError::EmptyName));
}

#[test]
fn validate_rejects_malformed_completion_keys() {
    let mut habit = Habit::new("Journal", "#FF6B6B", 0);
    habit.completions.insert("not-a-date".to_string(), true);

    let err = habit.validate().unwrap_err();
    assert_eq!(
        err,
        HabitValidationError::InvalidCompletionDate("not-a-date".to_string())
    );
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let mut habit = Habit::new("Meditate", "#9370DB", 1_714_500_000_000);
    habit.id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    habit.completions.insert("2024-05-01".to_string(), true);
    habit.completions.insert("2024-05-02".to_string(), false);

    let json = serde_json::to_value(&habit).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["name"], "Meditate");
    assert_eq!(json["color"], "#9370DB");
    assert_eq!(json["completions"]["2024-05-01"], true);
    assert_eq!(json["completions"]["2024-05-02"], false);
    assert_eq!(json["createdAt"], 1_714_500_000_000_i64);
    assert!(json.get("created_at").is_none());

    let decoded: Habit = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, habit);
}
