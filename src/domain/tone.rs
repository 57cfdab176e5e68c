//! 헤더/인사말 문구 선택(레비 톤).

/// 문구 선택용 주사위 포트. 프로덕션은 난수, 테스트는 고정 인덱스를 주입한다.
pub trait ToneDice: Send + Sync {
    /// `0..upper` 범위의 인덱스를 하나 고른다.
    fn roll(&self, upper: usize) -> usize;
}

/// 헤더 문구 변형 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVariant {
    A,
    B,
    C,
    D,
}

impl HeaderVariant {
    pub fn key(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

const GREETINGS: [&str; 4] = [
    "좋은 아침이다. 정신 차려라.",
    "아침이다. 게을러지지 마라.",
    "좋은 아침이다. 오늘도 심장을 바쳐라.",
    "일과는 시작됐다. 바로 움직여라.",
];

/// 아침 인사말을 하나 고른다. 헤더 선택과는 독립적으로 굴린다.
pub fn pick_greeting(dice: &dyn ToneDice) -> &'static str {
    GREETINGS[dice.roll(GREETINGS.len()) % GREETINGS.len()]
}

/// 네 가지 고정 템플릿 중 하나로 헤더를 만든다.
/// 멘션이 비어 있으면 멘션 접두는 생략된다.
pub fn pick_header(
    mentions: &str,
    repo_full_name: &str,
    dice: &dyn ToneDice,
) -> (String, HeaderVariant) {
    let with_mention = if mentions.is_empty() {
        String::new()
    } else {
        format!("{mentions} ")
    };

    let variants = [
        (
            format!("{with_mention}{repo_full_name} 리뷰 요청 목록이다. 지체하지 말고 바로 확인해라."),
            HeaderVariant::A,
        ),
        (
            format!(
                "{with_mention}{repo_full_name} 리뷰가 밀려 있다. 시간 끌면 머지와 릴리스가 늦어진다. 지금 처리해라."
            ),
            HeaderVariant::B,
        ),
        (
            format!("{with_mention}리뷰 요청이다. 빠르게 확인하고 대응하라."),
            HeaderVariant::C,
        ),
        (
            format!("{with_mention}리뷰 요청이다. 게을러지지 마라. 당장 확인해라."),
            HeaderVariant::D,
        ),
    ];

    let idx = dice.roll(variants.len()) % variants.len();
    variants[idx].clone()
}
