pub mod errors;
pub mod db;
pub mod validate;

pub mod user;
pub mod user_credentials;
pub mod company_user;

pub mod category;
pub mod icon;
pub mod social_network;

pub mod company;
pub mod company_social_network;
pub mod product;
pub mod product_feature;

pub mod service_offering;
pub mod testimonial;
pub mod team_member;
pub mod news;

pub mod contact_message;
pub mod partner_application;
pub mod job_application;

#[cfg(test)]
mod tests;
