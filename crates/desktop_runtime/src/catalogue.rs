//! Read-only catalogue of external applications and the desktop collections that group them.

use std::sync::OnceLock;

use leptos::logging;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::model::{OpenWindowRequest, WindowId, WindowKind};

include!(concat!(env!("OUT_DIR"), "/catalogue_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueItem {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<CatalogueLink>,
}

/// Desktop folder grouping catalogue items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    DeFi,
    Infra,
    NftsGaming,
    Community,
    /// Everything not claimed by a named category.
    Archive,
    All,
}

impl Collection {
    /// Folders shown as desktop icons, in display order.
    pub const DESKTOP: [Collection; 5] = [
        Collection::DeFi,
        Collection::Infra,
        Collection::NftsGaming,
        Collection::Community,
        Collection::Archive,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::DeFi => "defi",
            Self::Infra => "infra",
            Self::NftsGaming => "nfts",
            Self::Community => "community",
            Self::Archive => "archive",
            Self::All => "all-projects",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "defi" => Some(Self::DeFi),
            "infra" => Some(Self::Infra),
            "nfts" => Some(Self::NftsGaming),
            "community" => Some(Self::Community),
            "archive" => Some(Self::Archive),
            "all-projects" | "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Programs",
            other => other.category_name().unwrap_or("Archive"),
        }
    }

    fn category_name(self) -> Option<&'static str> {
        match self {
            Self::DeFi => Some("DeFi"),
            Self::Infra => Some("Infra"),
            Self::NftsGaming => Some("NFTs & Gaming"),
            Self::Community => Some("Community"),
            Self::Archive | Self::All => None,
        }
    }

    pub fn contains(self, item: &CatalogueItem) -> bool {
        match self {
            Self::All => true,
            Self::Archive => Self::DESKTOP
                .iter()
                .filter_map(|collection| collection.category_name())
                .all(|name| name != item.category),
            named => named.category_name() == Some(item.category.as_str()),
        }
    }

    pub fn window_id(self) -> WindowId {
        WindowId::for_collection(self.key())
    }

    pub fn open_request(self) -> OpenWindowRequest {
        OpenWindowRequest::new(self.window_id(), WindowKind::CollectionView, self.label())
            .with_payload(json!({ "collection": self.key() }))
    }
}

/// Items of `items` that belong in `collection`, preserving catalogue order.
pub fn items_in_collection(items: &[CatalogueItem], collection: Collection) -> Vec<&CatalogueItem> {
    items.iter().filter(|item| collection.contains(item)).collect()
}

pub fn item_open_request(item: &CatalogueItem) -> OpenWindowRequest {
    OpenWindowRequest::new(
        WindowId::for_item(&item.id),
        WindowKind::ItemDetail,
        item.name.clone(),
    )
    .with_payload(json!({ "item_id": item.id }))
}

/// The catalogue embedded at build time.
pub fn builtin_catalogue() -> &'static [CatalogueItem] {
    static CATALOGUE: OnceLock<Vec<CatalogueItem>> = OnceLock::new();
    CATALOGUE.get_or_init(|| match serde_json::from_str(CATALOGUE_JSON) {
        Ok(items) => items,
        Err(err) => {
            logging::warn!("embedded catalogue parse failed: {err}");
            Vec::new()
        }
    })
}

pub fn find_item(item_id: &str) -> Option<&'static CatalogueItem> {
    builtin_catalogue().iter().find(|item| item.id == item_id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn item(id: &str, category: &str) -> CatalogueItem {
        CatalogueItem {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: category.to_string(),
            description: String::new(),
            tags: Vec::new(),
            links: Vec::new(),
        }
    }

    #[test]
    fn named_collections_match_category_and_archive_takes_the_rest() {
        let items = vec![
            item("a", "DeFi"),
            item("b", "Infra"),
            item("c", "NFTs & Gaming"),
            item("d", "Others"),
            item("e", "Community"),
            item("f", "Social"),
        ];

        let ids = |collection| {
            items_in_collection(&items, collection)
                .into_iter()
                .map(|item| item.id.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(Collection::DeFi), vec!["a"]);
        assert_eq!(ids(Collection::NftsGaming), vec!["c"]);
        assert_eq!(ids(Collection::Archive), vec!["d", "f"]);
        assert_eq!(ids(Collection::All), vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn collection_keys_round_trip_and_derive_window_ids() {
        for collection in Collection::DESKTOP.into_iter().chain([Collection::All]) {
            assert_eq!(Collection::from_key(collection.key()), Some(collection));
        }
        assert_eq!(Collection::from_key("unknown"), None);
        assert_eq!(Collection::DeFi.window_id(), WindowId::new("defi"));

        let request = Collection::NftsGaming.open_request();
        assert_eq!(request.title, "NFTs & Gaming");
        assert_eq!(request.kind, WindowKind::CollectionView);
        assert_eq!(request.payload, json!({ "collection": "nfts" }));
    }

    #[test]
    fn item_requests_use_item_prefixed_ids() {
        let request = item_open_request(&item("orbit-swap", "DeFi"));
        assert_eq!(request.id, WindowId::new("item-orbit-swap"));
        assert_eq!(request.kind, WindowKind::ItemDetail);
        assert_eq!(request.payload, json!({ "item_id": "orbit-swap" }));
    }

    #[test]
    fn builtin_catalogue_is_embedded_with_unique_ids() {
        let items = builtin_catalogue();
        assert!(!items.is_empty());
        let ids: HashSet<_> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
        assert!(find_item(&items[0].id).is_some());
        assert!(find_item("missing").is_none());
    }
}
