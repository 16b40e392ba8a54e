use crate::{
    adaptation::{AdaptationRecord, Tone},
    breakdown::types::{MAX_STEPS, MIN_STEPS},
    tasks::Task,
};

pub fn breakdown_system_prompt() -> String {
    concat!(
        "You break one task into small, concrete, immediately startable steps.\n",
        "Rules:\n",
        "1) Reply with numbered steps only, one per line, nothing else.\n",
        "2) End every line with the step's minutes in the form \"-- N min\".\n",
        "3) Step minutes must add up close to the task's estimate.\n",
        "4) Plain text only. No markdown markup, no preamble, no closing remarks."
    )
    .to_string()
}

pub fn build_breakdown_prompt(task: &Task, adaptation: &AdaptationRecord) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!("Task: {}\n", task.title.trim()));
    let description = task.description.trim();
    if !description.is_empty() {
        prompt.push_str(&format!("Details: {description}\n"));
    }
    prompt.push_str(&format!(
        "Estimated total: {} minutes.\n",
        task.estimated_minutes
    ));
    prompt.push_str(&format!(
        "Produce between {MIN_STEPS} and {MAX_STEPS} steps whose minutes sum close to that total.\n"
    ));
    prompt.push_str(&format!(
        "Keep every step at or below difficulty {} of 5.\n",
        adaptation.complexity_ceiling
    ));
    prompt.push_str(tone_cue(adaptation.tone));
    prompt
}

fn tone_cue(tone: Tone) -> &'static str {
    match tone {
        Tone::Gentle => {
            "Phrase each step softly and keep steps tiny; the reader is low on energy today. \
             Include a short pause or breather where it helps.\n"
        }
        Tone::Standard => "Phrase each step plainly and practically.\n",
        Tone::Energetic => {
            "Phrase each step with momentum; the reader is ready for bigger pieces. \
             Lead with the most meaningful chunk.\n"
        }
    }
}
