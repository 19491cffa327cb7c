//! Ordered rule evaluation.

use tracing::trace;

use super::{
    EscalatingRollPenaltyRule, ExactWinRule, KickOutRule, RepeatTurnRule, Rule, RuleContext,
    RuleKind,
};

/// An explicit, ordered list of rules.
///
/// Every rule in the chain runs on every evaluation, even after one has
/// granted a repeat turn, so side effects never depend on an earlier answer.
#[derive(Debug, Default)]
pub struct RuleChain {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleChain {
    /// Empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard race rules, penalising after `penalty_streak` max-face turns.
    ///
    /// ```
    /// use ladder_race::rules::RuleChain;
    ///
    /// let chain = RuleChain::standard(3);
    /// assert_eq!(
    ///     chain.names(),
    ///     vec!["exact-win", "kick-out", "escalating-roll-penalty", "repeat-turn"]
    /// );
    /// ```
    #[must_use]
    pub fn standard(penalty_streak: u32) -> Self {
        Self::new()
            .with_rule(ExactWinRule)
            .with_rule(KickOutRule)
            .with_rule(EscalatingRollPenaltyRule::new(penalty_streak))
            .with_rule(RepeatTurnRule)
    }

    /// Append a rule (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// No rules at all?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in evaluation order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule in order. Returns whether any granted a repeat turn.
    pub fn evaluate(&mut self, ctx: &mut RuleContext<'_>) -> bool {
        self.run(ctx, |_| true)
    }

    /// Run only the rules of `kind`, in order.
    pub fn evaluate_kind(&mut self, kind: RuleKind, ctx: &mut RuleContext<'_>) -> bool {
        self.run(ctx, |rule| rule.kind() == kind)
    }

    fn run(&mut self, ctx: &mut RuleContext<'_>, include: impl Fn(&dyn Rule) -> bool) -> bool {
        let mut repeat_turn = false;
        for rule in &mut self.rules {
            if !include(&**rule) {
                continue;
            }
            let granted = rule.evaluate(ctx);
            trace!(rule = rule.name(), player = %ctx.player, granted, "rule evaluated");
            repeat_turn |= granted;
        }
        repeat_turn
    }
}
