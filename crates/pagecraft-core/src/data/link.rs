use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{envelope, malformed, open_envelope, Data};

pub const LINK_V1: &str = "link::v1";

const KNOWN_TAGS: [&str; 5] = [
    "OPEN_PAGE",
    "OPEN_URL",
    "SEND_EMAIL",
    "CALL_PHONE",
    "SCROLL_TO_ELEMENT",
];

/// Where a scroll-to-element link lands, by element key and the name of that
/// element's element-id prop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementIdConfig {
    pub element_key: String,
    pub prop_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkAction {
    #[serde(rename_all = "camelCase")]
    OpenPage {
        #[serde(default)]
        page_id: Option<String>,
        #[serde(default)]
        open_in_new_tab: bool,
    },
    #[serde(rename_all = "camelCase")]
    OpenUrl {
        url: String,
        #[serde(default)]
        open_in_new_tab: bool,
    },
    #[serde(rename_all = "camelCase")]
    SendEmail {
        to: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subject: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    CallPhone { phone_number: String },
    #[serde(rename_all = "camelCase")]
    ScrollToElement {
        #[serde(default)]
        element_id_config: Option<ElementIdConfig>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block: Option<ScrollBlock>,
    },
}

/// A parsed link. Actions with a tag this version does not know are carried
/// through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkData {
    Action(LinkAction),
    Unknown(Data),
}

pub fn parse(data: &Data) -> Option<LinkData> {
    if data.is_null() {
        return None;
    }
    let action = open_envelope(data, LINK_V1).unwrap_or(data);
    let Some(tag) = action.get("type").and_then(Value::as_str) else {
        malformed("link", data);
        return None;
    };

    if !KNOWN_TAGS.contains(&tag) {
        return Some(LinkData::Unknown(data.clone()));
    }
    match serde_json::from_value::<LinkAction>(action.clone()) {
        Ok(action) => Some(LinkData::Action(action)),
        Err(_) => {
            malformed("link", data);
            None
        }
    }
}

pub fn to_data(link: &LinkData) -> Data {
    match link {
        LinkData::Action(action) => {
            envelope(LINK_V1, serde_json::to_value(action).unwrap_or(Data::Null))
        }
        LinkData::Unknown(data) => data.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_open_page() {
        let link = parse(&json!({
            "type": "OPEN_PAGE",
            "payload": {"pageId": "p1", "openInNewTab": true}
        }));
        assert_eq!(
            link,
            Some(LinkData::Action(LinkAction::OpenPage {
                page_id: Some("p1".into()),
                open_in_new_tab: true,
            }))
        );
    }

    #[test]
    fn writes_envelope() {
        let link = LinkData::Action(LinkAction::CallPhone {
            phone_number: "+1555".into(),
        });
        let data = to_data(&link);
        assert_eq!(data["@@pagecraft/type"], "link::v1");
        assert_eq!(data["value"]["payload"]["phoneNumber"], "+1555");
        assert_eq!(parse(&data), Some(link));
    }

    #[test]
    fn unknown_tag_is_kept_verbatim() {
        let data = json!({"type": "OPEN_POPUP", "payload": {"id": 3}});
        let link = parse(&data).unwrap();
        assert_eq!(to_data(&link), data);
    }

    #[test]
    fn known_tag_with_bad_payload_is_malformed() {
        assert_eq!(parse(&json!({"type": "OPEN_URL", "payload": {}})), None);
    }
}
