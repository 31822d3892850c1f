//! OpenAPI document. Request bodies are mirrored here as schema-only structs.

use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct CreateUserDoc {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

#[derive(ToSchema)]
pub struct PasswordDoc { pub password: String }

#[derive(ToSchema)]
pub struct ActiveDoc { pub active: bool }

#[derive(ToSchema)]
pub struct BindRequestDoc { pub user_id: Uuid, pub company_id: Uuid }

#[derive(ToSchema)]
pub struct CompanyInputDoc {
    pub ruc: Option<String>,
    pub name: String,
    pub category_id: Uuid,
    pub description: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: String,
    pub active: Option<bool>,
    pub logo_url: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub tiktok: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(ToSchema)]
pub struct SocialLinkDoc { pub social_network_id: Uuid, pub username: String, pub url: String }

#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub name: String,
    pub company_id: Uuid,
    pub category_id: Uuid,
    pub description: String,
    /// Decimal with at most two fractional digits, e.g. `"19.99"`.
    pub price: String,
    pub image_url: Option<String>,
    pub active: Option<bool>,
}

#[derive(ToSchema)]
pub struct FeatureDoc { pub name: String, pub value: String }

#[derive(ToSchema)]
pub struct CategoryDoc { pub name: String, pub description: Option<String> }

#[derive(ToSchema)]
pub struct IconDoc { pub name: String, pub code: String }

#[derive(ToSchema)]
pub struct SocialNetworkDoc { pub name: String, pub base_url: String, pub icon_id: Uuid }

#[derive(ToSchema)]
pub struct OfferingDoc {
    pub title: String,
    pub description: String,
    pub icon_id: Uuid,
    pub category_id: Uuid,
    pub active: Option<bool>,
}

#[derive(ToSchema)]
pub struct TestimonialDoc { pub name: String, pub position: String, pub company_id: Uuid, pub comment: String }

#[derive(ToSchema)]
pub struct ApprovalDoc { pub approved: bool }

#[derive(ToSchema)]
pub struct TeamMemberDoc {
    pub name: String,
    pub position: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct NewsDoc { pub title: String, pub content: String, pub link: Option<String>, pub photo_url: Option<String> }

#[derive(ToSchema)]
pub struct ContactDoc { pub name: String, pub email: String, pub subject: String, pub message: String }

#[derive(ToSchema)]
pub struct ReadDoc { pub read: bool }

#[derive(ToSchema)]
pub struct PartnerDoc {
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub position: String,
    pub address: String,
    pub city: String,
    pub company_description: String,
    pub reason: String,
}

#[derive(ToSchema)]
pub struct PartnerReviewDoc {
    /// `pending`, `approved` or `rejected`
    pub status: String,
    pub admin_notes: Option<String>,
}

#[derive(ToSchema)]
pub struct JobApplicationDoc {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub desired_position: String,
    pub relevant_experience: String,
    pub cover_letter: String,
    pub cv_url: String,
    /// `.pdf`, `.doc` or `.docx`
    pub cv_file_name: String,
    /// At most 5 MiB.
    pub cv_size_bytes: i64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::catalog::list_categories,
        crate::routes::catalog::get_category,
        crate::routes::catalog::create_category,
        crate::routes::catalog::update_category,
        crate::routes::catalog::delete_category,
        crate::routes::catalog::list_icons,
        crate::routes::catalog::create_icon,
        crate::routes::catalog::update_icon,
        crate::routes::catalog::delete_icon,
        crate::routes::catalog::list_social_networks,
        crate::routes::catalog::create_social_network,
        crate::routes::catalog::update_social_network,
        crate::routes::catalog::delete_social_network,
        crate::routes::companies::public_list,
        crate::routes::companies::public_get,
        crate::routes::companies::list,
        crate::routes::companies::create,
        crate::routes::companies::get,
        crate::routes::companies::update,
        crate::routes::companies::delete,
        crate::routes::companies::add_social_link,
        crate::routes::companies::remove_social_link,
        crate::routes::products::public_list,
        crate::routes::products::public_get,
        crate::routes::products::list,
        crate::routes::products::company_choices,
        crate::routes::products::create,
        crate::routes::products::get,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::products::list_features,
        crate::routes::products::add_feature,
        crate::routes::products::remove_feature,
        crate::routes::content::public_offerings,
        crate::routes::content::list_offerings,
        crate::routes::content::create_offering,
        crate::routes::content::update_offering,
        crate::routes::content::delete_offering,
        crate::routes::content::public_testimonials,
        crate::routes::content::submit_testimonial,
        crate::routes::content::list_testimonials,
        crate::routes::content::set_testimonial_approval,
        crate::routes::content::delete_testimonial,
        crate::routes::content::list_team,
        crate::routes::content::create_team_member,
        crate::routes::content::get_team_member,
        crate::routes::content::update_team_member,
        crate::routes::content::delete_team_member,
        crate::routes::content::list_news,
        crate::routes::content::get_news,
        crate::routes::content::create_news,
        crate::routes::content::update_news,
        crate::routes::content::delete_news,
        crate::routes::inbox::submit_contact,
        crate::routes::inbox::list_contacts,
        crate::routes::inbox::set_contact_read,
        crate::routes::inbox::delete_contact,
        crate::routes::inbox::submit_partner,
        crate::routes::inbox::list_partners,
        crate::routes::inbox::get_partner,
        crate::routes::inbox::review_partner,
        crate::routes::inbox::delete_partner,
        crate::routes::inbox::submit_job_application,
        crate::routes::inbox::list_job_applications,
        crate::routes::inbox::get_job_application,
        crate::routes::inbox::delete_job_application,
        crate::routes::users::list_users,
        crate::routes::users::create_user,
        crate::routes::users::set_password,
        crate::routes::users::set_active,
        crate::routes::users::delete_user,
        crate::routes::users::list_bindings,
        crate::routes::users::bind,
        crate::routes::users::unbind,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            CreateUserDoc,
            PasswordDoc,
            ActiveDoc,
            BindRequestDoc,
            CompanyInputDoc,
            SocialLinkDoc,
            ProductInputDoc,
            FeatureDoc,
            CategoryDoc,
            IconDoc,
            SocialNetworkDoc,
            OfferingDoc,
            TestimonialDoc,
            ApprovalDoc,
            TeamMemberDoc,
            NewsDoc,
            ContactDoc,
            ReadDoc,
            PartnerDoc,
            PartnerReviewDoc,
            JobApplicationDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "public"),
        (name = "companies"),
        (name = "products"),
        (name = "catalog"),
        (name = "content"),
        (name = "inbox"),
        (name = "users")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_public_and_admin_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/api/companies/{id}"));
        assert!(paths.contains_key("/admin/products/company-choices"));
        assert!(paths.contains_key("/admin/company-users"));
        assert!(paths.contains_key("/api/socios"));
    }
}
