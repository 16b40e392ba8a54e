use crate::adaptation::Tone;

// The one taxonomy-to-copy table; every surface explaining a denial, a
// hiccup or a conflict goes through here so the voice stays consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKey {
    BreakdownDeclined,
    AssistantFellBack,
    RequestParked,
    EditKeptForReview,
    WorkingWithoutCache,
}

// Never the words "quota", "limit" or "error", no raw error text.
pub fn user_copy(key: CopyKey, tone: Tone) -> &'static str {
    match (key, tone) {
        (CopyKey::BreakdownDeclined, Tone::Gentle) => {
            "You've used all your step-by-step helpers for this month. \
             They'll be back soon. Until then, one small piece at a time is plenty."
        }
        (CopyKey::BreakdownDeclined, Tone::Standard) => {
            "You're out of step-by-step helpers until next month. \
             You can still break this down yourself whenever you're ready."
        }
        (CopyKey::BreakdownDeclined, Tone::Energetic) => {
            "That's every helper used this month, nice mileage! \
             Fresh ones arrive with the new month."
        }
        (CopyKey::AssistantFellBack, Tone::Gentle) => {
            "We couldn't reach the helper just now, so here's a simple plan to start from. \
             It didn't use up any of your helpers."
        }
        (CopyKey::AssistantFellBack, Tone::Standard) => {
            "The helper wasn't reachable, so we put together a starter plan for you. \
             Nothing was used from your monthly helpers."
        }
        (CopyKey::AssistantFellBack, Tone::Energetic) => {
            "Helper's offline, no problem. Here's a ready-made plan to dive into, on the house."
        }
        (CopyKey::RequestParked, Tone::Gentle) => {
            "You're offline right now, so we've set this aside. \
             It will be ready once you're connected again."
        }
        (CopyKey::RequestParked, Tone::Standard) => {
            "No connection at the moment. This request is saved and will run when you're back online."
        }
        (CopyKey::RequestParked, Tone::Energetic) => {
            "Offline for now! This is queued up and will fire the moment you reconnect."
        }
        (CopyKey::EditKeptForReview, Tone::Gentle) => {
            "This task changed in two places. We kept the newest version and tucked your edit \
             away so nothing is lost. Have a look whenever suits you."
        }
        (CopyKey::EditKeptForReview, Tone::Standard) => {
            "This task was updated elsewhere too. The newer version is showing; \
             your edit is saved for review."
        }
        (CopyKey::EditKeptForReview, Tone::Energetic) => {
            "Two edits raced and the newest one won. Yours is saved right here if you want it back."
        }
        (CopyKey::WorkingWithoutCache, Tone::Gentle) => {
            "Things may feel a little slower than usual while we fetch everything fresh. \
             All your work is safe."
        }
        (CopyKey::WorkingWithoutCache, Tone::Standard) => {
            "Loading fresh from the server for now; everything still works as normal."
        }
        (CopyKey::WorkingWithoutCache, Tone::Energetic) => {
            "Running straight from the server today. A touch slower, fully dependable."
        }
    }
}

pub fn fallback_encouragement(tone: Tone) -> &'static str {
    match tone {
        Tone::Gentle => "One step at a time is enough. Rest when you need to.",
        Tone::Standard => "Work through these at your own pace.",
        Tone::Energetic => "You've got this. First step, go!",
    }
}
