/*
 * Responsibility
 * - People の request/response DTO
 * - validate() は形式チェックのみ (業務ルールは持たない)
 * - uid は request DTO に存在しない (create 時に AuthCtx から注入する)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePersonRequest {
    pub name: String,
    pub image: String,
    pub title: String,
}

impl CreatePersonRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.name.len() > 256 {
            return Err("name must be <= 256 chars");
        }
        if self.image.len() > 2048 {
            return Err("image must be <= 2048 chars");
        }
        if self.title.len() > 256 {
            return Err("title must be <= 256 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePersonRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub title: Option<String>,
}

impl UpdatePersonRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(name) = &self.name
            && name.len() > 256
        {
            return Err("name must be <= 256 chars");
        }
        if let Some(image) = &self.image
            && image.len() > 2048
        {
            return Err("image must be <= 2048 chars");
        }
        if let Some(title) = &self.title
            && title.len() > 256
        {
            return Err("title must be <= 256 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub title: String,
    // basic variant では所有者が居ないので、無い時は出さない
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_a_name() {
        let req: CreatePersonRequest = serde_json::from_value(json!({
            "name": "   ",
            "image": "http://x/y.png",
            "title": "Eng"
        }))
        .expect("deserialize");

        assert!(req.validate().is_err());
    }

    #[test]
    fn create_body_cannot_carry_an_owner() {
        // 未知フィールド (uid など) は schema 境界で捨てられる
        let req: CreatePersonRequest = serde_json::from_value(json!({
            "name": "Ann",
            "image": "http://x/y.png",
            "title": "Eng",
            "uid": "spoofed-owner"
        }))
        .expect("deserialize");

        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_rejects_a_blank_name() {
        let req = UpdatePersonRequest {
            name: Some("   ".to_string()),
            image: None,
            title: None,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn update_allows_partial_bodies() {
        let req: UpdatePersonRequest =
            serde_json::from_value(json!({ "title": "Boss" })).expect("deserialize");

        assert!(req.validate().is_ok());
        assert_eq!(req.title.as_deref(), Some("Boss"));
        assert!(req.name.is_none());
        assert!(req.image.is_none());
    }

    #[test]
    fn response_uses_camel_case_timestamps_and_omits_a_missing_uid() {
        let res = PersonResponse {
            id: Uuid::nil(),
            name: "Ann".to_string(),
            image: "http://x/y.png".to_string(),
            title: "Eng".to_string(),
            uid: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        };

        let value = serde_json::to_value(&res).expect("serialize");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("uid").is_none());
    }

    #[test]
    fn response_includes_the_uid_when_present() {
        let res = PersonResponse {
            id: Uuid::nil(),
            name: "Ann".to_string(),
            image: "http://x/y.png".to_string(),
            title: "Eng".to_string(),
            uid: Some("provider-uid-1".to_string()),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        };

        let value = serde_json::to_value(&res).expect("serialize");
        assert_eq!(value["uid"], json!("provider-uid-1"));
    }
}
