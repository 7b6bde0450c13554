//! Axis transitions and phase mapping.
//!
//! Both are pure. The default transition is to stay on the previous axis;
//! keyword triggers move it one quadrant at a time. There is no direct
//! observational → executive jump.

use kanagi_types::{KanagiPhase, ThinkingAxis};

/// Turn count at which a session with no history starts out constructive.
pub const CONSTRUCTIVE_TURN_THRESHOLD: u32 = 20;

struct TriggerRule {
    from: ThinkingAxis,
    to: ThinkingAxis,
    triggers: &'static [&'static str],
}

// Evaluated in order. When several rules for the same `from` fire, the last
// one wins.
const RULES: &[TriggerRule] = &[
    TriggerRule {
        from: ThinkingAxis::Observational,
        to: ThinkingAxis::Introspective,
        triggers: &[
            "why", "なぜ", "理由", "reasoning", "考え", "内省", "reflect", "どうして", "なんで",
            "なぜなら", "思考",
        ],
    },
    TriggerRule {
        from: ThinkingAxis::Introspective,
        to: ThinkingAxis::Constructive,
        triggers: &[
            "how", "どう", "構造", "structure", "構築", "reconstruction", "どのように",
            "どうやって", "作り", "設計", "構成", "組み立て", "再構築",
        ],
    },
    TriggerRule {
        from: ThinkingAxis::Introspective,
        to: ThinkingAxis::Observational,
        triggers: &[
            "見る", "観察", "確認", "observe", "見て", "見ると", "調べる", "見てみる", "観測",
        ],
    },
    TriggerRule {
        from: ThinkingAxis::Constructive,
        to: ThinkingAxis::Executive,
        triggers: &[
            "実行", "execution", "decision", "決断", "決定", "やる", "する", "決める", "act",
            "do it", "go ahead",
        ],
    },
    TriggerRule {
        from: ThinkingAxis::Constructive,
        to: ThinkingAxis::Introspective,
        triggers: &[
            "再考", "考え直す", "内省", "reflect", "考え", "思考", "見直す", "再検討",
        ],
    },
    TriggerRule {
        from: ThinkingAxis::Executive,
        to: ThinkingAxis::Observational,
        triggers: &[
            "確認", "見る", "観察", "observe", "見て", "見ると", "調べる", "見てみる", "観測",
            "どうなった", "結果", "完了", "終わった", "終了", "done", "finished", "complete",
        ],
    },
    TriggerRule {
        from: ThinkingAxis::Executive,
        to: ThinkingAxis::Introspective,
        triggers: &[
            "振り返る", "反省", "内省", "reflect", "考え", "思考", "どうだった", "どうか", "評価",
        ],
    },
];

/// Axis for a session with no previous axis.
#[must_use]
pub fn initial_axis(turn_count: u32) -> ThinkingAxis {
    if turn_count >= CONSTRUCTIVE_TURN_THRESHOLD {
        ThinkingAxis::Constructive
    } else {
        ThinkingAxis::Observational
    }
}

/// Next thinking axis for this turn.
#[must_use]
pub fn next_axis(prev: Option<ThinkingAxis>, input: &str, turn_count: u32) -> ThinkingAxis {
    let Some(prev) = prev else {
        return initial_axis(turn_count);
    };
    let normalized = input.trim().to_lowercase();

    RULES
        .iter()
        .rev()
        .find(|rule| rule.from == prev && rule.triggers.iter().any(|t| normalized.contains(t)))
        .map_or(prev, |rule| rule.to)
}

/// Quadrant phase for an axis. Never yields `Integration`.
#[must_use]
pub const fn phase_of(axis: ThinkingAxis) -> KanagiPhase {
    match axis {
        ThinkingAxis::Observational => KanagiPhase::LeftIn,
        ThinkingAxis::Introspective => KanagiPhase::LeftOut,
        ThinkingAxis::Constructive => KanagiPhase::RightIn,
        ThinkingAxis::Executive => KanagiPhase::RightOut,
    }
}
