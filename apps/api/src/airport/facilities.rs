use serde::Serialize;

use crate::airport::name_matches;
use crate::congestion::zones::Terminal;

/// Category filter value that matches every facility.
pub const ALL_CATEGORIES: &str = "전체";

/// Category filter options, in display order.
pub const FACILITY_CATEGORIES: [&str; 6] = [ALL_CATEGORIES, "식음료", "쇼핑", "편의", "금융", "휴식"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Facility {
    pub id: u32,
    pub name: &'static str,
    pub category: &'static str,
    pub location: &'static str,
    pub hours: &'static str,
    pub terminal: Terminal,
}

const fn facility(
    id: u32,
    name: &'static str,
    category: &'static str,
    location: &'static str,
    hours: &'static str,
    terminal: Terminal,
) -> Facility {
    Facility {
        id,
        name,
        category,
        location,
        hours,
        terminal,
    }
}

static FACILITIES: &[Facility] = &[
    facility(1, "푸드코트", "식음료", "4층 면세구역 동편", "06:00 ~ 22:00", Terminal::T1),
    facility(2, "카페", "식음료", "3층 출국장 중앙", "24시간", Terminal::T1),
    facility(3, "면세점", "쇼핑", "3층 면세구역", "06:30 ~ 21:30", Terminal::T1),
    facility(4, "편의점", "편의", "1층 입국장 B 게이트 옆", "24시간", Terminal::T1),
    facility(5, "약국", "편의", "지하 1층 교통센터 연결통로", "07:00 ~ 21:00", Terminal::T1),
    facility(6, "환전소", "금융", "1층 입국장, 3층 출국장", "06:00 ~ 22:00", Terminal::T1),
    facility(7, "수하물 보관소", "편의", "1층 입국장 7번 출구", "24시간", Terminal::T1),
    facility(8, "샤워실", "휴식", "4층 면세구역 환승편의시설", "24시간", Terminal::T1),
    facility(9, "라운지", "휴식", "4층 면세구역 서편", "05:30 ~ 23:00", Terminal::T1),
    facility(10, "푸드코트", "식음료", "4층 면세구역 중앙", "06:00 ~ 22:00", Terminal::T2),
    facility(11, "카페", "식음료", "1층 입국장 중앙", "24시간", Terminal::T2),
    facility(12, "면세점", "쇼핑", "3층 면세구역", "06:30 ~ 21:30", Terminal::T2),
    facility(13, "편의점", "편의", "지하 1층 교통센터", "24시간", Terminal::T2),
    facility(14, "환전소", "금융", "1층 입국장, 3층 출국장", "06:00 ~ 22:00", Terminal::T2),
    facility(15, "캡슐호텔", "휴식", "1층 입국장 동편", "24시간", Terminal::T2),
    facility(16, "라운지", "휴식", "4층 면세구역 동편", "05:30 ~ 23:00", Terminal::T2),
];

/// Facilities in `terminal`, in `category` (or all when `None` or [`ALL_CATEGORIES`]),
/// whose name contains `query`.
pub fn facilities_for(terminal: Terminal, category: Option<&str>, query: &str) -> Vec<Facility> {
    FACILITIES
        .iter()
        .filter(|f| f.terminal == terminal)
        .filter(|f| match category {
            None => true,
            Some(c) if c == ALL_CATEGORIES => true,
            Some(c) => f.category == c,
        })
        .filter(|f| name_matches(f.name, query))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_is_offered() {
        for f in FACILITIES {
            assert!(FACILITY_CATEGORIES.contains(&f.category), "{}", f.category);
        }
    }

    #[test]
    fn test_all_category_keeps_terminal_filter() {
        let all = facilities_for(Terminal::T2, Some(ALL_CATEGORIES), "");
        assert_eq!(all.len(), 7);
        assert!(all.iter().all(|f| f.terminal == Terminal::T2));
        assert_eq!(facilities_for(Terminal::T2, None, "").len(), 7);
    }

    #[test]
    fn test_category_and_name_combine() {
        let rest = facilities_for(Terminal::T1, Some("휴식"), "라운지");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, 9);
        assert!(facilities_for(Terminal::T1, Some("쇼핑"), "라운지").is_empty());
    }
}
