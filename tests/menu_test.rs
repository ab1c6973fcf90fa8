//! Tests for the interactive menu driven by scripted input

use hospital_tree::cli::menu::{Menu, CHOICE_PROMPT, MENU_TEXT};
use hospital_tree::config::DisplayStyle;
use hospital_tree::domain::HospitalTree;
use hospital_tree::util::testing;

/// Runs a scripted session and returns (transcript, final tree).
fn run_session(script: &[&str], style: DisplayStyle) -> (String, HospitalTree) {
    testing::init_test_setup();
    let input = script.iter().map(|line| format!("{}\n", line)).collect::<String>();
    let mut out = Vec::new();
    let mut menu = Menu::new(HospitalTree::new(), input.as_bytes(), &mut out).with_style(style);
    menu.run().expect("menu session");
    let tree = menu.into_tree();
    (String::from_utf8(out).expect("utf8 transcript"), tree)
}

const CARDIOLOGY_SETUP: &[&str] = &[
    "1",
    "Cardiology",
    "2",
    "Cardiology",
    "Dr. Lee",
    "Cardiologist",
    "3",
    "Dr. Lee",
    "John Doe",
    "Hypertension, age 54",
];

fn script(steps: &[&[&'static str]]) -> Vec<&'static str> {
    steps.concat()
}

#[test]
fn given_cardiology_session_when_displaying_then_prints_structure() {
    let steps = script(&[CARDIOLOGY_SETUP, &["7", "8"]]);
    let (transcript, tree) = run_session(&steps, DisplayStyle::Indented);

    assert!(transcript.contains("Department 'Cardiology' added successfully.\n"));
    assert!(transcript.contains("Doctor 'Dr. Lee' added to department 'Cardiology' successfully.\n"));
    assert!(transcript.contains("Patient 'John Doe' added to Dr. 'Dr. Lee' successfully.\n"));
    let expected_display = "\
Hospital (root)
  Cardiology (department)
    Dr. Lee (doctor)
      Details: Cardiologist
      John Doe (patient)
        Details: Hypertension, age 54
";
    assert!(transcript.contains(&format!("{}{}", CHOICE_PROMPT, expected_display)));
    assert!(transcript.ends_with("Exiting the program.\n"));
    assert_eq!(tree.len(), 4);
}

#[test]
fn given_unknown_department_when_adding_doctor_then_not_found_and_remaining_prompts_skipped() {
    let (transcript, tree) = run_session(&["2", "Oncology", "8"], DisplayStyle::Indented);

    let expected = format!(
        "{menu}{choice}Enter department name: Department not found.\n{menu}{choice}Exiting the program.\n",
        menu = MENU_TEXT,
        choice = CHOICE_PROMPT
    );
    assert_eq!(transcript, expected);
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_unknown_doctor_when_adding_patient_then_not_found() {
    let (transcript, tree) = run_session(&["1", "ER", "3", "Dr. Nobody", "8"], DisplayStyle::Indented);
    assert!(transcript.contains("Enter doctor's name: Doctor not found.\n"));
    assert!(!transcript.contains("Enter patient's name: "));
    assert_eq!(tree.len(), 2);
}

#[test]
fn given_cardiology_session_when_deleting_doctor_then_department_has_no_children() {
    let steps = script(&[CARDIOLOGY_SETUP, &["5", "Dr. Lee", "7", "8"]]);
    let (transcript, tree) = run_session(&steps, DisplayStyle::Indented);

    assert!(transcript.contains("Doctor 'Dr. Lee' deleted successfully.\n"));
    assert!(transcript.contains(&format!(
        "{}Hospital (root)\n  Cardiology (department)\n{}",
        CHOICE_PROMPT, MENU_TEXT
    )));
    assert_eq!(tree.find_doctor("Dr. Lee"), None);
    assert_eq!(tree.find_patient("John Doe"), None);
}

#[test]
fn given_missing_names_when_deleting_then_not_found_messages() {
    let (transcript, tree) = run_session(
        &["4", "Cardiology", "5", "Dr. Lee", "6", "John Doe", "8"],
        DisplayStyle::Indented,
    );
    assert!(transcript.contains("Enter department name: Department not found.\n"));
    assert!(transcript.contains("Enter doctor's name: Doctor not found.\n"));
    assert!(transcript.contains("Enter patient's name: Patient not found.\n"));
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_department_deleted_then_patient_delete_reports_not_found() {
    let steps = script(&[CARDIOLOGY_SETUP, &["4", "Cardiology", "6", "John Doe", "8"]]);
    let (transcript, tree) = run_session(&steps, DisplayStyle::Indented);
    assert!(transcript.contains("Department 'Cardiology' deleted successfully.\n"));
    assert!(transcript.contains("Patient not found.\n"));
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_invalid_choices_when_running_then_menu_repeats() {
    let (transcript, _) = run_session(&["abc", "42", "", "8"], DisplayStyle::Indented);
    assert_eq!(transcript.matches("Invalid choice. Please try again.\n").count(), 3);
    assert_eq!(transcript.matches(MENU_TEXT).count(), 4);
}

#[test]
fn given_input_ends_mid_prompt_when_running_then_session_ends_cleanly() {
    let (transcript, tree) = run_session(&["2", "Cardiology"], DisplayStyle::Indented);
    assert!(transcript.ends_with(&format!(
        "Department not found.\n{}{}",
        MENU_TEXT, CHOICE_PROMPT
    )));
    assert!(!transcript.contains("Exiting the program."));
    assert_eq!(tree.len(), 1);

    let (transcript, tree) = run_session(&["1"], DisplayStyle::Indented);
    assert!(transcript.ends_with("Enter department name: "));
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_tree_style_when_displaying_then_box_drawing_labels() {
    let steps = script(&[CARDIOLOGY_SETUP, &["7", "8"]]);
    let (transcript, _) = run_session(&steps, DisplayStyle::Tree);
    assert!(transcript.contains(&format!("{}Hospital (root)\n", CHOICE_PROMPT)));
    assert!(transcript.contains("Dr. Lee (doctor): Cardiologist\n"));
    assert!(transcript.contains("John Doe (patient): Hypertension, age 54\n"));
    assert!(!transcript.contains("Details:"));
}

#[test]
fn given_latin1_name_when_adding_department_then_replaced_and_session_continues() {
    testing::init_test_setup();
    let input: &[u8] = b"1\nCardiology\n1\nCaf\xe9\n7\n8\n";
    let mut out = Vec::new();
    let mut menu = Menu::new(HospitalTree::new(), input, &mut out);
    menu.run().expect("menu session");
    let tree = menu.into_tree();

    let transcript = String::from_utf8(out).expect("utf8 transcript");
    assert!(transcript.contains("Department 'Caf\u{FFFD}' added successfully.\n"));
    assert!(transcript.contains("  Caf\u{FFFD} (department)\n"));
    assert!(transcript.ends_with("Exiting the program.\n"));
    assert_eq!(tree.len(), 3);
    assert!(tree.find_department("Caf\u{FFFD}").is_some());
}
