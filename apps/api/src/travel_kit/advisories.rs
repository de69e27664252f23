//! Static destination advisories.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryNote {
    pub text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_text: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Advisory {
    pub country: &'static str,
    pub flag: &'static str,
    pub notes: &'static [AdvisoryNote],
}

const fn note(text: &'static str) -> AdvisoryNote {
    AdvisoryNote {
        text,
        link: None,
        link_text: None,
    }
}

const fn linked(text: &'static str, link: &'static str, link_text: &'static str) -> AdvisoryNote {
    AdvisoryNote {
        text,
        link: Some(link),
        link_text: Some(link_text),
    }
}

const ETIAS: &str = "https://www.etias.co.kr/";

static ADVISORIES: &[Advisory] = &[
    Advisory {
        country: "일본",
        flag: "🇯🇵",
        notes: &[
            note("자연재해: 일본 기상청 및 NHK를 통해 실시간 정보 확인 + 'Safety Tips' 앱 설치(긴급 알림)"),
            note("치안: 전반적으로 안전한 편, 각 지역별 위험 지역 확인"),
            note("교통: 좌측통행 국가 → 보행 시 주의, 대중교통 이용 시 정숙"),
            note("문화: 식당에서는 직원 안내 후 착석(팁 문화는 X) + 문신 있을 경우 온천 이용 제한"),
            linked(
                "입국 시: Visit Japan Web을 통해 미리 입국 수속 준비",
                "https://services.digital.go.jp/ko/visit-japan-web/",
                "Visit Japan Web",
            ),
        ],
    },
    Advisory {
        country: "미국",
        flag: "🇺🇸",
        notes: &[
            note("범죄: 일부 지역 총기 허용 → 야간 외출 시 주의"),
            note("교통: 비보호 좌회전 등 한국과 다른 교통 법규 → 현지에서 운전 시 숙지 필요"),
            note("문화: 팁 문화가 일반적, 식당에서는 15~20%의 팁을 지불"),
            note("자연재해: 산불, 허리케인 등이 발생 가능 → 여행 전 현지 기상 정보 확인"),
            linked(
                "입국 시: 최대 90일 체류 가능한 ESTA 여행 비자 신청 필요",
                "https://esta.cbp.dhs.gov/",
                "ESTA",
            ),
        ],
    },
    Advisory {
        country: "프랑스",
        flag: "🇫🇷",
        notes: &[
            note("치안: 관광지, 지하철 등에서 소매치기가 빈번 → 소지품 관리에 각별히 주의"),
            note("보안: Vigipirate 보안 경보 체계 운영 중, 공공장소 보안 검색에 협조 요망"),
            note("문화: 식당에서는 직원 안내 후 착석 + 프랑스어로 인사"),
            note("의료: 높은 의료 비용 → 여행자 보험 권장"),
            linked(
                "입국 시: 90일 이내 단기 체류 시 쉥겐 비자 면제(유럽 비자 면제 프로그램 ETIAS 필요)",
                ETIAS,
                "ETIAS",
            ),
        ],
    },
    Advisory {
        country: "이탈리아",
        flag: "🇮🇹",
        notes: &[
            note("치안: 소매치기와 절도가 빈번 → 소지품 관리에 각별히 주의"),
            note("기후: 여름철 고온 → 충분한 수분 섭취와 자외선 차단에 유의"),
            note("문화: 식당에서는 직원 안내 후 착석 + 장소별 복장 규정 확인"),
            linked(
                "입국 시: 유럽 비자 면제 프로그램 ETIAS 필요(90일 이내 단기 체류)",
                ETIAS,
                "ETIAS",
            ),
        ],
    },
    Advisory {
        country: "스페인",
        flag: "🇪🇸",
        notes: &[
            note("치안: 소매치기와 절도가 빈번 → 소지품 관리에 각별히 주의"),
            note("교통: 과속 단속 카메라 설치 → 속도 제한 준수 요망"),
            note("문화: 식당에서는 직원 안내 후 착석 + 카드 사용 권장"),
            linked(
                "입국 시: 유럽 비자 면제 프로그램 ETIAS 필요(90일 이내 단기 체류)",
                ETIAS,
                "ETIAS",
            ),
        ],
    },
    Advisory {
        country: "태국",
        flag: "🇹🇭",
        notes: &[
            note("범죄: 정부기관 직원 사칭 피싱 범죄 발생, 개인 정보를 요구하는 연락에 주의"),
            note("교통: 좌측통행 국가 + 교통체증이 심함(이동 시간에 여유)"),
            note("문화: 사원 방문 시 복장 규정 확인"),
            note("입국 시: 관광 목적일 경우 비자없이 90일간 단기 체류 가능"),
        ],
    },
    Advisory {
        country: "베트남",
        flag: "🇻🇳",
        notes: &[
            note("치안: 오토바이를 이용한 날치기 절도 빈번 → 소지품 관리에 각별히 주의"),
            note("보건: 모기 매개 질병 예방을 위한 모기 기피제 사용 + 긴 옷 착용"),
            note("문화: 사원 방문 시 복장 규정 확인"),
            linked(
                "입국 시: 비자없이 최대 45일간 단기 체류 가능(E-VISA 신청 시 90일)",
                "https://evisa.gov.vn/",
                "E-VISA",
            ),
        ],
    },
    Advisory {
        country: "호주",
        flag: "🇦🇺",
        notes: &[
            note("자연재해: 건조 기후로 인한 산불 주의 → 현지 기상 정보 확인"),
            note("교통: 좌측통행 국가 → 현지 교통 법규 확인"),
            note("불법: 공공장소나 해변에서 음주 행위, 쿼카 만지기 등"),
            note("문화: 팁은 필수 X, 대중교통 이용 시 식사 금지"),
            note("입국 시: 최대 3개월간 체류 가능한 eVisitor 신청 필요"),
        ],
    },
    Advisory {
        country: "필리핀",
        flag: "🇵🇭",
        notes: &[
            note("치안: 불법 총기를 이용한 범죄 빈번 → 인적이 드문 지역의 이동 자제"),
            note("교통: 교통 체증이 심한 편, 'Grab' 앱 이용 권장"),
            note("자연재해: 우기 때 태풍 및 집중호우, 화산 인근 지역 방문 시 지침 준수"),
            note("문화: 팁 문화가 일반적, 서비스를 받은 후 50-100페소 정도의 팁을 지불"),
            linked(
                "입국 시: 온라인 서비스 E-Travel 작성 후 QR 제시",
                "https://etravel.gov.ph/",
                "E-Travel",
            ),
        ],
    },
];

/// Advisories for `country`, or for every destination when no country is given.
pub fn advisories_for(country: Option<&str>) -> Vec<Advisory> {
    ADVISORIES
        .iter()
        .filter(|a| country.map_or(true, |c| a.country == c))
        .copied()
        .collect()
}
