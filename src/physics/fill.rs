/// 水位を目標に向かって指数的に近づける（1 フレーム分）。
///
/// `current + (target - current) * rate`。行き過ぎることはなく、結果は常に `[0, 1]` に収まる。
pub fn smooth_fill(current: f32, target: f32, rate: f32) -> f32 {
    (current + (target - current) * rate).clamp(0.0, 1.0)
}
