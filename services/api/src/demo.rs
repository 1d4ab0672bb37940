use crate::infra::{InMemoryApplicantStore, InMemoryFieldStore};
use applicant_hub::applicants::{
    delete_applicant, ApplicantEditor, ApplicantRecord, ApplicantService, ConfirmationPrompt,
    DeleteOutcome, Document, DocumentSet, DocumentSlot, FieldFilter, FieldKind, FieldMap,
    ListQuery, SortDirection,
};
use applicant_hub::error::AppError;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reference date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the edit-session portion of the demo
    #[arg(long)]
    pub(crate) skip_edit: bool,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

struct AutoConfirm;

impl ConfirmationPrompt for AutoConfirm {
    fn confirm(&self, message: &str) -> bool {
        println!("  [confirm] {message} -> yes");
        true
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let store = Arc::new(InMemoryApplicantStore::default());
    let registry = Arc::new(InMemoryFieldStore::default());
    let service = ApplicantService::new(store.clone(), registry);

    println!("== Applicant Hub demo ({today}) ==");

    let passport = service.add_custom_field("Passport No", FieldKind::Text)?;
    println!(
        "defined custom field '{}' ({} input, id {})",
        passport.label,
        passport.kind.label(),
        passport.id
    );

    let mut maria = sample_fields("Maria", "Cruz", "Makati City", "Domestic Helper");
    maria.insert("passport_no".to_string(), "P1234567".to_string());
    let maria = service.register(maria, resume_documents("maria-cruz-resume.pdf", today))?;
    let jose = service.register(
        sample_fields("Jose", "Dela Cruz", "Quezon City", "Construction Worker"),
        DocumentSet::new(),
    )?;
    service.register(
        sample_fields("Anna", "Santos", "Mandaluyong City", "Nurse"),
        DocumentSet::new(),
    )?;
    println!("registered {} applicants", service.list()?.len());
    print_document_inventory(&maria);

    let matches = service.select(&ListQuery {
        search: "makati".to_string(),
        ..ListQuery::default()
    })?;
    println!("search 'makati' -> {}", render_names(&matches));

    let sorted = service.select(&ListQuery {
        search: String::new(),
        filter_field: FieldFilter::All,
        sort_field: "first_name".to_string(),
        direction: SortDirection::Desc,
    })?;
    println!("sort first_name desc -> {}", render_names(&sorted));

    let with_passport = service.select(&ListQuery {
        filter_field: FieldFilter::Field("passport_no".to_string()),
        ..ListQuery::default()
    })?;
    println!("has passport_no -> {}", render_names(&with_passport));

    if !args.skip_edit {
        let mut editor = ApplicantEditor::new(store.clone(), today);
        editor.open(maria.id)?;
        println!("  session {}", editor.state().label());
        editor.stage_field("date_of_birth", "1992-12-10")?;
        let saved = editor.save()?;
        println!("  session {}", editor.state().label());
        println!(
            "edited {}: date_of_birth -> 1992-12-10, derived age -> {}",
            saved.display_name(),
            saved.field("age").unwrap_or("-")
        );
    }

    match delete_applicant(store.as_ref(), &AutoConfirm, &jose)? {
        DeleteOutcome::Deleted(removed) => {
            println!("deleted {}", removed.display_name());
        }
        DeleteOutcome::Cancelled => println!("delete cancelled"),
    }
    println!("{} applicants remain", service.list()?.len());

    Ok(())
}

fn print_document_inventory(record: &ApplicantRecord) {
    println!("document inventory for {}:", record.display_name());
    for slot in DocumentSlot::ALL {
        let count = record.documents.get(&slot).map(Vec::len).unwrap_or(0);
        println!("  {}: {count}", slot.label());
    }
}

fn render_names(records: &[ApplicantRecord]) -> String {
    if records.is_empty() {
        return "(none)".to_string();
    }
    records
        .iter()
        .map(ApplicantRecord::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn resume_documents(file_name: &str, today: NaiveDate) -> DocumentSet {
    let media_type = mime_guess::from_path(file_name).first_or_octet_stream();
    let document = Document::from_upload(
        file_name,
        154_000,
        &media_type,
        today,
        &format!("uploads/{file_name}"),
    );
    DocumentSet::from([(DocumentSlot::Resume, vec![document])])
}

fn sample_fields(first_name: &str, last_name: &str, city: &str, job: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    for (key, value) in [
        ("job_applied_for", job),
        ("country_of_destination", "Hong Kong"),
        ("first_name", first_name),
        ("last_name", last_name),
        ("gender", "Female"),
        ("date_of_birth", "1990-05-15"),
        ("nationality", "Filipino"),
        ("civil_status", "Single"),
        ("contact_number_1", "+63 917 123 4567"),
        ("email", "applicant@email.com"),
        ("street_address", "123 Main Street"),
        ("barangay", "San Isidro"),
        ("city", city),
        ("province", "Metro Manila"),
        ("emergency_contact_name", "Juan Cruz"),
        ("emergency_contact_number", "+63 919 111 2222"),
        ("work_country", "Hong Kong"),
        ("years_of_experience", "2.5"),
        ("job_position", job),
    ] {
        fields.insert(key.to_string(), value.to_string());
    }
    fields
}
