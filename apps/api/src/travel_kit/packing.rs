//! Per-user packing checklist, seeded with a default categorized list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::errors::AppError;

/// Category given to items the user adds.
pub const CUSTOM_CATEGORY: &str = "기타";

const DEFAULT_ITEMS: &[(&str, &[&str])] = &[
    (
        "필수",
        &[
            "여권",
            "이심/유심",
            "현금",
            "지갑",
            "해외 사용 가능 카드",
            "충전기 (+보조배터리)",
            "상비약",
            "숙소 예약 확인 내역",
            "각종 바우처 및 티켓 사본",
            "여행자 보험 증명서",
            "멀티 어댑터",
            "이어폰",
            "(국제 면허증)",
        ],
    ),
    (
        "기내용",
        &["실내용 슬리퍼", "목베개", "가습 마스크", "물티슈", "온열 안대", "간식"],
    ),
    (
        "욕실용품",
        &[
            "칫솔치약 세트",
            "여행용 샴푸+컨디셔너+바디워시 세트",
            "여행용 샤워기+필터",
            "클렌징폼 (+클렌징티슈)",
            "면도기",
            "여성용품",
        ],
    ),
    (
        "생활용품",
        &[
            "접이식 전기포트",
            "접이식 다리미",
            "접이식 우산",
            "세탁망",
            "나무젓가락",
            "고데기",
            "비상식량",
            "휴대용 선풍기",
        ],
    ),
    (
        "의류/잡화",
        &[
            "잠옷", "아우터", "상하의", "양말", "속옷", "모자", "신발", "선글라스", "크기별 가방",
            "수건", "(수영복)", "머플러",
        ],
    ),
    ("뷰티", &["기초화장품", "색조화장품"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackingItem {
    pub id: u64,
    pub name: String,
    pub checked: bool,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPackingItem {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct PackingList {
    items: Vec<PackingItem>,
    next_id: u64,
}

impl PackingList {
    pub fn with_defaults() -> Self {
        let items: Vec<PackingItem> = DEFAULT_ITEMS
            .iter()
            .flat_map(|(category, names)| names.iter().map(move |name| (*category, *name)))
            .zip(1..)
            .map(|((category, name), id)| PackingItem {
                id,
                name: name.to_string(),
                checked: false,
                category: category.to_string(),
            })
            .collect();
        let next_id = items.len() as u64 + 1;
        Self { items, next_id }
    }

    pub fn items(&self) -> &[PackingItem] {
        &self.items
    }

    /// Appends an unchecked item under [`CUSTOM_CATEGORY`].
    pub fn add(&mut self, name: &str) -> Result<PackingItem, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("item name cannot be empty".to_string()));
        }
        let item = PackingItem {
            id: self.next_id,
            name: name.to_string(),
            checked: false,
            category: CUSTOM_CATEGORY.to_string(),
        };
        self.next_id += 1;
        self.items.push(item.clone());
        Ok(item)
    }

    pub fn toggle(&mut self, item_id: u64) -> Option<PackingItem> {
        let item = self.items.iter_mut().find(|item| item.id == item_id)?;
        item.checked = !item.checked;
        Some(item.clone())
    }

    pub fn remove(&mut self, item_id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        self.items.len() != before
    }

    /// Categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }
}

/// Checklists keyed by user id. A user's list is seeded on first access.
#[derive(Default)]
pub struct PackingLists {
    lists: RwLock<HashMap<String, PackingList>>,
}

impl PackingLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_list<R>(&self, user_id: &str, f: impl FnOnce(&mut PackingList) -> R) -> R {
        let mut lists = self.lists.write().await;
        let list = lists
            .entry(user_id.to_string())
            .or_insert_with(PackingList::with_defaults);
        f(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unchecked_with_unique_ids() {
        let list = PackingList::with_defaults();
        assert_eq!(list.items().len(), 47);
        assert!(list.items().iter().all(|item| !item.checked));
        let mut ids: Vec<u64> = list.items().iter().map(|item| item.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 47);
        assert_eq!(list.categories()[0], "필수");
    }

    #[test]
    fn test_added_item_goes_to_custom_category() {
        let mut list = PackingList::with_defaults();
        let item = list.add("  카메라  ").unwrap();
        assert_eq!(item.name, "카메라");
        assert_eq!(item.category, CUSTOM_CATEGORY);
        assert_eq!(list.categories().last().map(String::as_str), Some(CUSTOM_CATEGORY));
        assert!(list.add("   ").is_err());
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut list = PackingList::with_defaults();
        assert!(list.toggle(1).unwrap().checked);
        assert!(!list.toggle(1).unwrap().checked);
        assert!(list.remove(1));
        assert!(!list.remove(1));
        assert!(list.toggle(1).is_none());
    }

    #[test]
    fn test_category_disappears_with_last_item() {
        let mut list = PackingList::with_defaults();
        let beauty: Vec<u64> = list
            .items()
            .iter()
            .filter(|item| item.category == "뷰티")
            .map(|item| item.id)
            .collect();
        for id in beauty {
            list.remove(id);
        }
        assert!(!list.categories().iter().any(|c| c == "뷰티"));
    }

    #[tokio::test]
    async fn test_lists_are_per_user() {
        let lists = PackingLists::new();
        lists.with_list("u1", |list| list.toggle(1)).await;

        let u1 = lists.with_list("u1", |list| list.items()[0].checked).await;
        let u2 = lists.with_list("u2", |list| list.items()[0].checked).await;
        assert!(u1);
        assert!(!u2);
    }
}
