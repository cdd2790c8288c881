//! 简单的柱状图组件（纯 CSS，无图表库）

use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
    /// daisyUI 背景色类，如 `bg-success`
    pub color: &'static str,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: u64, color: &'static str) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// 每根柱子相对最大值的百分比高度，全为 0 时都是 0
pub fn bar_heights(values: &[u64]) -> Vec<u32> {
    let max = values.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return vec![0; values.len()];
    }
    values
        .iter()
        .map(|v| ((v * 100) as f64 / max as f64).round() as u32)
        .collect()
}

/// 演示用的活跃度，由种子确定，范围 0..100
pub fn sample_activity(seed: u64) -> u64 {
    let x = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    (x >> 33) % 100
}

#[component]
pub fn BarChart(
    #[prop(into)] title: String,
    #[prop(into)] bars: Signal<Vec<Bar>>,
    /// 面板出现前隐藏（淡入效果）
    #[prop(optional, into)]
    visible: Option<Signal<bool>>,
) -> impl IntoView {
    let container_class = move || {
        let shown = visible.map(|v| v.get()).unwrap_or(true);
        if shown {
            "card bg-base-100 shadow-xl transition-opacity duration-500 opacity-100"
        } else {
            "card bg-base-100 shadow-xl transition-opacity duration-500 opacity-0"
        }
    };

    view! {
        <div class=container_class>
            <div class="card-body">
                <h3 class="card-title justify-center">{title}</h3>
                <div class="flex items-end gap-2 h-48 w-full">
                    {move || {
                        let bars = bars.get();
                        let values: Vec<u64> = bars.iter().map(|b| b.value).collect();
                        bars.into_iter()
                            .zip(bar_heights(&values))
                            .map(|(bar, height)| {
                                view! {
                                    <div class="flex flex-col items-center justify-end flex-1 h-full">
                                        <span class="text-xs opacity-70">{bar.value}</span>
                                        <div
                                            class=format!("w-full rounded-t {}", bar.color)
                                            style=format!("height: {}%", height)
                                        ></div>
                                        <span class="text-xs truncate w-full text-center">{bar.label}</span>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_are_relative_to_max() {
        assert_eq!(bar_heights(&[12, 3]), vec![100, 25]);
        assert_eq!(bar_heights(&[0, 0]), vec![0, 0]);
        assert!(bar_heights(&[]).is_empty());
    }

    #[test]
    fn sample_activity_is_bounded_and_stable() {
        for seed in 0..50 {
            let value = sample_activity(seed);
            assert!(value < 100);
            assert_eq!(value, sample_activity(seed));
        }
    }
}
