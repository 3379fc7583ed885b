//! Member endpoints and models.

use futures::{
    stream::{self, BoxStream},
    StreamExt, TryStreamExt,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    client::{Client, Envelope},
    error::Error,
    pagination::scan_pages,
};

/// Entry of a training member list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMember {
    pub user: TrainingMemberUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMemberUser {
    #[serde(deserialize_with = "int_or_string")]
    pub user_id: i64,
    pub email: String,
}

/// Full LearnyBox user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberProfile {
    #[serde(deserialize_with = "int_or_string")]
    pub user_id: i64,
    pub email: String,
    /// Display name as formatted by LearnyBox.
    #[serde(rename = "_string", default)]
    pub display_name: String,
    /// Custom profile fields, keyed by field name, each holding a `value`.
    #[serde(default)]
    pub user_configs: Value,
}

impl MemberProfile {
    /// Returns the value of a custom profile field, if set and not blank.
    pub fn config_value(&self, field: &str) -> Option<String> {
        let value = self.user_configs.get(field)?.get("value")?;

        let value = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        (!value.is_empty()).then_some(value)
    }

    /// Postal address formatted as `street, postal_code city, country`.
    ///
    /// Returns `None` when none of the address fields are set.
    pub fn address(&self) -> Option<String> {
        let street = self.config_value("adresse");
        let postal_code = self.config_value("code_postal");
        let city = self.config_value("ville");
        let country = self.config_value("pays");

        if street.is_none() && postal_code.is_none() && city.is_none() && country.is_none() {
            return None;
        }

        Some(format!(
            "{}, {} {}, {}",
            street.unwrap_or_default(),
            postal_code.unwrap_or_default(),
            city.unwrap_or_default(),
            country.unwrap_or_default()
        ))
    }
}

fn int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(id) => Ok(id),
        IntOrString::Str(id) => id.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Member endpoints, see [`Client::member`].
pub struct MemberApi<'a> {
    client: &'a Client,
}

impl<'a> MemberApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches the full record of a LearnyBox user.
    ///
    /// # Returns
    /// - `Ok(MemberProfile)` - The user record
    /// - `Err(Error::MemberNotFound)` - LearnyBox has no user with this ID
    /// - `Err(Error::Api)` - Any other API failure
    pub async fn get_member_by_external_id(&self, user_id: i64) -> Result<MemberProfile, Error> {
        let route = format!("users/{user_id}/");

        match self.client.get::<Envelope<MemberProfile>>(&route, &[]).await {
            Ok(profile) => Ok(profile.data),
            Err(Error::Api { code: 404, .. }) => Err(Error::MemberNotFound(user_id)),
            Err(e) => Err(e),
        }
    }

    /// Streams every member of a training.
    ///
    /// Pages are requested lazily as the stream is polled and cached for a day, see the
    /// pagination module for the replay rules.
    pub fn get_all_members_by_training_id(
        &self,
        training_id: u64,
    ) -> BoxStream<'static, Result<TrainingMember, Error>> {
        let route = format!("formations/{training_id}/membres/");

        scan_pages(self.client.clone(), route)
            .map_ok(|page| {
                stream::iter(
                    page.into_iter()
                        .map(|entry| serde_json::from_value(entry).map_err(Error::from)),
                )
            })
            .try_flatten()
            .boxed()
    }
}
