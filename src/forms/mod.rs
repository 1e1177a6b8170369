use reqwest::Url;
use thiserror::Error;

use crate::models::{Credentials, DisplayConfig};
use crate::render::escape;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Site settings form submission.
#[derive(Debug, FromForm)]
pub struct CredentialsForm {
    pub user_id: String,
    pub access_token: String,
}

impl TryFrom<CredentialsForm> for Credentials {
    type Error = FormError;

    fn try_from(form: CredentialsForm) -> Result<Self, Self::Error> {
        let credentials = Credentials::new(form.user_id.trim(), form.access_token.trim());

        if !credentials.has_addressable_user_id() {
            return Err(FormError::InvalidField {
                field: "user_id",
                reason: format!("'{}' is not a valid Instagram user id", credentials.user_id),
            });
        }

        Ok(credentials)
    }
}

/// Block settings form submission. Text fields, parsed on conversion.
#[derive(Debug, FromForm)]
pub struct DisplayForm {
    pub count: String,
    pub width: String,
    pub height: String,
}

fn parse_number(field: &'static str, value: &str) -> Result<u32, FormError> {
    value.trim().parse::<u32>().map_err(|_| FormError::InvalidField {
        field,
        reason: format!("'{}' is not a positive whole number", value.trim()),
    })
}

impl TryFrom<DisplayForm> for DisplayConfig {
    type Error = FormError;

    fn try_from(form: DisplayForm) -> Result<Self, Self::Error> {
        let display = DisplayConfig {
            count: parse_number("count", &form.count)?,
            width: parse_number("width", &form.width)?,
            height: parse_number("height", &form.height)?,
        };

        display.validate().map_err(|reason| FormError::InvalidField {
            field: field_of(&reason),
            reason,
        })?;

        Ok(display)
    }
}

// Bounds messages start with the field name
fn field_of(reason: &str) -> &'static str {
    ["count", "width", "height"]
        .into_iter()
        .find(|field| reason.starts_with(field))
        .unwrap_or("display")
}

fn text_field(name: &str, title: &str, description: &str, value: &str) -> String {
    format!(
        "<div class=\"form-item\">\n  <label for=\"{name}\">{title}</label>\n  <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n  <div class=\"description\">{description}</div>\n</div>\n",
        name = name,
        title = escape(title),
        value = escape(value),
        description = escape(description),
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

pub fn credentials_page(credentials: &Credentials, authorize_link: &Url) -> String {
    let mut body = format!(
        "<p>To configure your instagram account you need to authorise your account. To do this, click <a href=\"{}\" target=\"_blank\">here</a>.</p>\n",
        escape(authorize_link.as_str())
    );
    body.push_str("<form method=\"post\" action=\"/instagram/settings\">\n");
    body.push_str(&text_field(
        "user_id",
        "User Id",
        "Your unique Instagram user id. Eg. 460786510",
        &credentials.user_id,
    ));
    body.push_str(&text_field(
        "access_token",
        "Access Token",
        "Your Instagram access token. Eg. 460786509.ab103e5.a54b6834494643588d4217ee986384a8",
        &credentials.access_token,
    ));
    body.push_str("<button type=\"submit\">Save configuration</button>\n</form>\n");

    page("Instagram block settings", &body)
}

pub fn display_page(display: &DisplayConfig) -> String {
    let mut body = String::from("<form method=\"post\" action=\"/instagram/block/settings\">\n");
    body.push_str(&text_field("count", "Number of images to display.", "", &display.count.to_string()));
    body.push_str(&text_field("width", "Image width in pixels.", "", &display.width.to_string()));
    body.push_str(&text_field("height", "Image height in pixels.", "", &display.height.to_string()));
    body.push_str("<button type=\"submit\">Save block</button>\n</form>\n");

    page("Instagram block", &body)
}
