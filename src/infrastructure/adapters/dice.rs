//! 문구 선택 주사위 포트 구현 어댑터.

use rand::Rng;

use crate::domain::tone::ToneDice;

/// 스레드 로컬 난수 기반 주사위. 호출마다 독립적으로 굴린다.
pub struct ThreadRngDice;

impl ToneDice for ThreadRngDice {
    fn roll(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        rand::rng().random_range(0..upper)
    }
}
