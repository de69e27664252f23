use serde::Serialize;

use crate::airport::name_matches;
use crate::congestion::zones::Terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AirlineCounter {
    pub id: u32,
    pub name: &'static str,
    /// IATA code, `-` for the catch-all row.
    pub code: &'static str,
    pub location: &'static str,
    pub terminal: Terminal,
}

const fn counter(
    id: u32,
    name: &'static str,
    code: &'static str,
    location: &'static str,
    terminal: Terminal,
) -> AirlineCounter {
    AirlineCounter {
        id,
        name,
        code,
        location,
        terminal,
    }
}

static AIRLINE_COUNTERS: &[AirlineCounter] = &[
    counter(1, "아시아나항공", "OZ", "3층 A, B, C 카운터", Terminal::T1),
    counter(2, "제주항공", "7C", "3층 L 카운터", Terminal::T1),
    counter(3, "진에어", "LJ", "3층 F 카운터", Terminal::T1),
    counter(4, "티웨이항공", "TW", "3층 H 카운터", Terminal::T1),
    counter(5, "이스타항공", "ZE", "3층 F 카운터", Terminal::T1),
    counter(6, "에어서울", "RS", "3층 D 카운터", Terminal::T1),
    counter(7, "중국남방항공", "CZ", "3층 J 카운터", Terminal::T1),
    counter(8, "중국동방항공", "MU", "3층 H 카운터", Terminal::T1),
    counter(9, "캐세이퍼시픽", "CX", "3층 M 카운터", Terminal::T1),
    counter(10, "기타", "-", "3층 H, J, K, M 카운터", Terminal::T1),
    counter(11, "대한항공", "KE", "3층 A, B, D, E 카운터", Terminal::T2),
    counter(12, "델타항공", "DL", "3층 B, C 카운터", Terminal::T2),
    counter(13, "에어프랑스", "AF", "3층 C 카운터", Terminal::T2),
    counter(14, "KLM 네덜란드항공", "KL", "3층 C 카운터", Terminal::T2),
    counter(15, "중화항공", "CI", "3층 G 카운터", Terminal::T2),
    counter(16, "샤먼항공", "MF", "3층 G 카운터", Terminal::T2),
    counter(17, "가루다인도네시아항공", "GA", "3층 G 카운터", Terminal::T2),
];

/// Counters in `terminal` whose airline name contains `query`.
pub fn counters_for(terminal: Terminal, query: &str) -> Vec<AirlineCounter> {
    AIRLINE_COUNTERS
        .iter()
        .filter(|c| c.terminal == terminal && name_matches(c.name, query))
        .copied()
        .collect()
}
