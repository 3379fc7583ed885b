//! Requests to the members map API.

#[cfg(feature = "web")]
use crate::model::member::MembersMapDto;
use crate::model::member::{RegisterStatus, RegistrationPageDto, RegistrationRequest};

/// Result of a registration form submission
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Member published, the server redirected to the map of `member`
    Registered {
        member: String,
        status: RegisterStatus,
    },
    /// Invalid form, re-rendered with its errors and a new nonce
    Rejected(RegistrationPageDto),
}

/// Retrieve the map content, flagging `member` when given
#[cfg(feature = "web")]
pub async fn get_members_map(member: &str) -> Result<MembersMapDto, String> {
    use reqwasm::http::Request;

    let response = Request::get(&format!("/api/members-map?{}", member_query(member)?))
        .credentials(reqwasm::http::RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    match response.status() {
        200 => response
            .json::<MembersMapDto>()
            .await
            .map_err(|e| format!("Failed to parse members map: {}", e)),
        _ => Err(error_message(response).await),
    }
}

/// Retrieve the registration form of `member`, `None` when the member is unknown
#[cfg(feature = "web")]
pub async fn get_registration_page(member: &str) -> Result<Option<RegistrationPageDto>, String> {
    use reqwasm::http::Request;

    let response = Request::get(&format!(
        "/api/members-map/register?{}",
        member_query(member)?
    ))
    .credentials(reqwasm::http::RequestCredentials::Include)
    .send()
    .await
    .map_err(|e| format!("Failed to send request: {}", e))?;

    match response.status() {
        200 => {
            let page = response
                .json::<RegistrationPageDto>()
                .await
                .map_err(|e| format!("Failed to parse registration form: {}", e))?;
            Ok(Some(page))
        }
        404 => Ok(None),
        _ => Err(error_message(response).await),
    }
}

/// Submit the registration form
///
/// The browser follows the 303 answering a valid form, so success is read from the query
/// string of the final URL.
#[cfg(feature = "web")]
pub async fn submit_registration(request: &RegistrationRequest) -> Result<Submission, String> {
    use reqwasm::http::Request;

    let response = Request::post("/api/members-map/register")
        .credentials(reqwasm::http::RequestCredentials::Include)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form_body(request)?)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    match response.status() {
        200 => parse_redirect(&response.url())
            .ok_or_else(|| format!("Unexpected registration redirect: {}", response.url())),
        422 => {
            let page = response
                .json::<RegistrationPageDto>()
                .await
                .map_err(|e| format!("Failed to parse registration form: {}", e))?;
            Ok(Submission::Rejected(page))
        }
        _ => Err(error_message(response).await),
    }
}

#[cfg(feature = "web")]
async fn error_message(response: reqwasm::http::Response) -> String {
    use crate::model::api::ErrorDto;

    if let Ok(error_dto) = response.json::<ErrorDto>().await {
        format!(
            "Request failed with status {}: {}",
            response.status(),
            error_dto.error
        )
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        format!(
            "Request failed with status {}: {}",
            response.status(),
            error_text
        )
    }
}

// Only used for its form-urlencoded serializer.
const FORM_BASE_URL: &str = "http://localhost/";

fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<String, String> {
    let mut url = reqwest::Url::parse(FORM_BASE_URL).map_err(|e| e.to_string())?;
    url.query_pairs_mut().extend_pairs(pairs);

    Ok(url.query().unwrap_or_default().to_string())
}

pub fn member_query(member: &str) -> Result<String, String> {
    encode_pairs([("member", member)])
}

pub fn form_body(request: &RegistrationRequest) -> Result<String, String> {
    let mut pairs = vec![
        ("member", request.member.as_str()),
        ("name", request.name.as_str()),
        ("category", request.category.as_str()),
        ("geo_coordinates", request.geo_coordinates.as_str()),
        ("address", request.address.as_str()),
        ("description", request.description.as_str()),
    ];
    if let Some(consent) = &request.consent {
        pairs.push(("consent", consent.as_str()));
    }
    pairs.push(("nonce", request.nonce.as_str()));

    encode_pairs(pairs)
}

/// Reads `member` and `register_status` from the URL the registration redirected to.
pub fn parse_redirect(url: &str) -> Option<Submission> {
    let url = reqwest::Url::parse(url).ok()?;

    let mut member = None;
    let mut status = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "member" => member = Some(value.into_owned()),
            "register_status" => status = RegisterStatus::parse(&value),
            _ => (),
        }
    }

    Some(Submission::Registered {
        member: member.filter(|member| !member.is_empty())?,
        status: status?,
    })
}
