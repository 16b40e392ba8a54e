use crate::{
    adaptation::{AdaptationRecord, UiTier},
    breakdown::types::BreakdownConfig,
    copy,
    tasks::{Breakdown, BreakdownSource, BreakdownStep, Task},
};

// Deterministic local plan for when the assistant is unavailable. Never
// touches the allowance.
pub fn fallback_breakdown(
    task: &Task,
    adaptation: &AdaptationRecord,
    config: &BreakdownConfig,
) -> Breakdown {
    let total = if task.estimated_minutes == 0 {
        config.fallback_default_minutes.max(1)
    } else {
        task.estimated_minutes
    };

    let template = template_for(adaptation.tier, &task.title);
    let minutes = spread_minutes(total, &template.weights);

    let steps = template
        .titles
        .into_iter()
        .zip(minutes)
        .map(|(title, minutes)| BreakdownStep { title, minutes })
        .collect();

    Breakdown {
        steps,
        total_minutes: total,
        adapted: true,
        source: BreakdownSource::Local,
        encouragement: Some(copy::fallback_encouragement(adaptation.tone).to_string()),
    }
}

struct StepTemplate {
    titles: Vec<String>,
    weights: Vec<u16>,
}

fn template_for(tier: UiTier, task_title: &str) -> StepTemplate {
    let task_title = task_title.trim();
    match tier {
        UiTier::Low => StepTemplate {
            titles: vec![
                format!("Do the first small piece of \"{task_title}\""),
                "Pause for a breather".to_string(),
                "Do one more small piece and stop there".to_string(),
            ],
            weights: vec![2, 1, 2],
        },
        UiTier::Medium => StepTemplate {
            titles: vec![
                format!("Get everything ready for \"{task_title}\""),
                "Work through the first half".to_string(),
                "Work through the second half".to_string(),
                "Tidy up and check the result".to_string(),
            ],
            weights: vec![1, 1, 1, 1],
        },
        UiTier::High => StepTemplate {
            titles: vec![
                format!("Sketch a quick plan for \"{task_title}\""),
                "Push through the core of the work".to_string(),
                "Handle the remaining details".to_string(),
                "Review everything and call it done".to_string(),
            ],
            weights: vec![1, 2, 2, 2],
        },
    }
}

// Largest-remainder split: floors first, leftover minutes to the largest
// fractional parts, earlier steps winning ties. Sum is always exact.
fn spread_minutes(total: u16, weights: &[u16]) -> Vec<u16> {
    let weight_sum: u32 = weights.iter().map(|w| *w as u32).sum();
    if weight_sum == 0 || weights.is_empty() {
        return Vec::new();
    }

    let total_u32 = total as u32;
    let mut minutes: Vec<u16> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(usize, u32)> = Vec::with_capacity(weights.len());
    let mut assigned: u32 = 0;

    for (index, weight) in weights.iter().enumerate() {
        let scaled = total_u32 * *weight as u32;
        let floor = scaled / weight_sum;
        minutes.push(floor as u16);
        assigned += floor;
        remainders.push((index, scaled % weight_sum));
    }

    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let mut leftover = total_u32 - assigned;
    for (index, _) in remainders {
        if leftover == 0 {
            break;
        }
        minutes[index] += 1;
        leftover -= 1;
    }

    // Lift zero-minute steps while keeping the sum exact.
    for index in 0..minutes.len() {
        if minutes[index] == 0 {
            if let Some(donor) = (0..minutes.len()).max_by_key(|i| minutes[*i]) {
                if minutes[donor] > 1 {
                    minutes[donor] -= 1;
                    minutes[index] = 1;
                }
            }
        }
    }

    minutes
}
