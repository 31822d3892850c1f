use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::company::{self, CompanyInput};
use crate::job_application::{self, JobApplicationInput};
use crate::partner_application::ApplicationStatus;
use crate::product::{self, ProductInput};
use crate::user;

fn company_json() -> serde_json::Value {
    serde_json::json!({
        "name": "Acme",
        "category_id": Uuid::new_v4(),
        "description": "Hardware store",
        "phone": "0999999999",
        "address": "Av. Amazonas 100"
    })
}

#[test]
fn company_input_fills_defaults() {
    let input: CompanyInput = serde_json::from_value(company_json()).unwrap();
    assert_eq!(input.ruc.as_deref(), Some(company::DEFAULT_RUC));
    assert!(input.active);
    assert_eq!(input.facebook.as_deref(), Some("https://www.facebook.com/"));
    assert_eq!(input.linkedin.as_deref(), Some("https://www.linkedin.com/"));
    assert!(input.validate().is_ok());
}

#[test]
fn company_ruc_must_be_digits() {
    assert!(company::validate_ruc(Some("179000000000A")).is_err());
    assert!(company::validate_ruc(Some("12345678900012")).is_err());
    assert!(company::validate_ruc(Some("1790000000001")).is_ok());
    assert!(company::validate_ruc(None).is_ok());
}

#[test]
fn company_rejects_bad_website() {
    let mut value = company_json();
    value["website"] = serde_json::json!("acme.ec");
    let input: CompanyInput = serde_json::from_value(value).unwrap();
    assert!(input.validate().is_err());
}

#[test]
fn product_price_bounds() {
    assert!(product::validate_price(Decimal::from_str("0").unwrap()).is_ok());
    assert!(product::validate_price(Decimal::from_str("19.99").unwrap()).is_ok());
    assert!(product::validate_price(Decimal::from_str("99999999.99").unwrap()).is_ok());
    assert!(product::validate_price(Decimal::from_str("-1.00").unwrap()).is_err());
    assert!(product::validate_price(Decimal::from_str("1.999").unwrap()).is_err());
    assert!(product::validate_price(Decimal::from_str("100000000").unwrap()).is_err());
}

#[test]
fn product_input_requires_name() {
    let input = ProductInput {
        name: " ".into(),
        company_id: Uuid::new_v4(),
        category_id: Uuid::new_v4(),
        description: "x".into(),
        price: Decimal::from(5),
        image_url: None,
        active: true,
    };
    assert!(input.validate().is_err());
}

#[test]
fn cv_rules() {
    assert!(job_application::validate_cv("cv.pdf", 1024).is_ok());
    assert!(job_application::validate_cv("CV.DOCX", 1024).is_ok());
    assert!(job_application::validate_cv("cv.png", 1024).is_err());
    assert!(job_application::validate_cv("pdf", 1024).is_err());
    let too_big = job_application::validate_cv("cv.pdf", job_application::MAX_CV_BYTES + 1).unwrap_err();
    assert!(too_big.to_string().contains("5MB"));
    assert!(job_application::validate_cv("cv.pdf", job_application::MAX_CV_BYTES).is_ok());
}

#[test]
fn cv_download_url_forces_attachment() {
    let url = "https://res.cloudinary.com/demo/raw/upload/v1/cv.pdf";
    assert_eq!(
        job_application::cv_download_url(url).as_deref(),
        Some("https://res.cloudinary.com/demo/raw/upload/fl_attachment/v1/cv.pdf")
    );
    assert_eq!(job_application::cv_download_url(""), None);
}

#[test]
fn job_application_input_checks_cv() {
    let input = JobApplicationInput {
        full_name: "Ana Pérez".into(),
        email: "ana@example.com".into(),
        phone: "0999".into(),
        desired_position: "Dev".into(),
        relevant_experience: "5 years".into(),
        cover_letter: "Hello".into(),
        cv_url: "https://files.example.com/upload/cv.exe".into(),
        cv_file_name: "cv.exe".into(),
        cv_size_bytes: 10,
    };
    assert!(input.validate().is_err());
}

#[test]
fn application_status_parses() {
    assert_eq!(ApplicationStatus::from_str("Approved").unwrap(), ApplicationStatus::Approved);
    assert_eq!(ApplicationStatus::Pending.as_str(), "pending");
    assert!(ApplicationStatus::from_str("archived").is_err());
}

#[test]
fn usernames_are_restricted() {
    assert!(user::validate_username("ana.perez+1").is_ok());
    assert!(user::validate_username("ana perez").is_err());
    assert!(user::validate_username("").is_err());
}
