// src/combat/src/combatant.rs

/// 表示可以参加战斗的活体
pub trait Combatant {
    /// 获取名称
    fn name(&self) -> &str;

    /// 获取当前生命值
    fn hp(&self) -> i32;

    /// 获取最大生命值
    fn max_hp(&self) -> i32;

    /// Target number an attack roll must meet or exceed.
    fn armor_class(&self) -> i32;

    /// Added to the d20 when this combatant attacks.
    fn attack_bonus(&self) -> i32;

    /// Flat damage modifier.
    fn attack_power(&self) -> i32;

    /// Flat reduction against monster-style damage.
    fn defense(&self) -> i32 {
        0
    }

    /// 击败后提供的经验值
    fn xp_reward(&self) -> u32 {
        0
    }

    /// Applies damage and returns how much HP was actually lost.
    fn take_damage(&mut self, amount: i32) -> i32;

    /// Restores HP up to the maximum and returns the amount healed.
    fn heal(&mut self, amount: i32) -> i32;

    /// 是否存活
    fn is_alive(&self) -> bool {
        self.hp() > 0
    }
}

/// Shared HP bookkeeping for stat blocks that store `hp`/`max_hp` directly.
pub(crate) fn apply_damage(hp: &mut i32, amount: i32) -> i32 {
    let lost = amount.max(0).min(*hp);
    *hp -= lost;
    lost
}

pub(crate) fn apply_heal(hp: &mut i32, max_hp: i32, amount: i32) -> i32 {
    let gained = amount.max(0).min(max_hp - *hp).max(0);
    *hp += gained;
    gained
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_never_goes_negative() {
        let mut hp = 5;
        assert_eq!(apply_damage(&mut hp, 9), 5);
        assert_eq!(hp, 0);
        assert_eq!(apply_damage(&mut hp, -3), 0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut hp = 8;
        assert_eq!(apply_heal(&mut hp, 10, 5), 2);
        assert_eq!(hp, 10);
    }
}
