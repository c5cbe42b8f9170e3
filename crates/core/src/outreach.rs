//! Outreach copy: AI prompt construction and the canned fallback message.

use crate::channels::Channel;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Tone used when the request does not name one.
pub const DEFAULT_TONE: &str = "friendly";

/// Mode used when the request does not name one.
pub const DEFAULT_MODE: &str = "cold_outreach";

/// System instruction sent ahead of every generation prompt.
pub const SYSTEM_PROMPT: &str = "You are a professional business communication assistant. \
     Write personalized, human-like messages for client outreach.";

/// Sampling temperature for generation requests.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// Tone name → description inserted into the prompt.
const TONES: &[(&str, &str)] = &[
    ("professional", "professional and business-like"),
    ("friendly", "warm and friendly"),
    ("casual", "casual and conversational"),
    ("confident", "confident and assertive"),
    ("soft sales", "gentle and persuasive without being pushy"),
];

/// Mode name → description inserted into the prompt.
const MODES: &[(&str, &str)] = &[
    ("cold_outreach", "first-time contact to introduce your services"),
    ("warm_followup", "follow-up message to re-engage the client"),
    (
        "conversion_push",
        "message to encourage conversion with an offer or urgency",
    ),
    ("reminder", "reminder message for clients who haven't responded"),
    ("friendly_checkin", "soft, human check-in message"),
];

const UNKNOWN_TONE: &str = "professional";
const UNKNOWN_MODE: &str = "professional outreach";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The lead details the prompt and fallback copy draw on.
#[derive(Debug, Clone, Copy)]
pub struct Prospect<'a> {
    pub client_name: &'a str,
    pub service_type: &'a str,
    pub website: Option<&'a str>,
    pub approach_count: i32,
    pub service_status: &'a str,
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// Describe a tone for the prompt. Unknown tones read as "professional".
pub fn describe_tone(tone: &str) -> &'static str {
    TONES
        .iter()
        .find(|(name, _)| *name == tone)
        .map_or(UNKNOWN_TONE, |(_, desc)| *desc)
}

/// Describe a mode for the prompt. Unknown modes read as "professional outreach".
pub fn describe_mode(mode: &str) -> &'static str {
    MODES
        .iter()
        .find(|(name, _)| *name == mode)
        .map_or(UNKNOWN_MODE, |(_, desc)| *desc)
}

/// Upper bound on generated tokens; WhatsApp messages are kept short.
pub fn max_tokens_for(channel: Channel) -> u32 {
    match channel {
        Channel::Whatsapp => 200,
        Channel::Email => 500,
    }
}

/// Build the user prompt asking the model for one outreach message.
pub fn build_prompt(prospect: &Prospect<'_>, channel: Channel, tone: &str, mode: &str) -> String {
    let length = match channel {
        Channel::Whatsapp => "short",
        Channel::Email => "medium length",
    };
    let website = prospect
        .website
        .filter(|w| !w.trim().is_empty())
        .unwrap_or("Not provided");

    format!(
        "Write a {tone} {channel} message for business outreach.\n\
         \n\
         Client Information:\n\
         - Name: {name}\n\
         - Service Type: {service}\n\
         - Website: {website}\n\
         - Previous Contact Count: {count} times\n\
         - Current Status: {status}\n\
         \n\
         Context: This is a {mode}.\n\
         \n\
         Requirements:\n\
         - Keep it human-like and non-spammy\n\
         - Personalize based on the client's information\n\
         - Don't use hard sales tactics\n\
         - Keep it concise ({length})\n\
         - Start with a friendly greeting\n\
         - Mention their service interest naturally\n\
         - End with a clear but soft call-to-action\n\
         \n\
         Generate the message now:",
        tone = describe_tone(tone),
        channel = channel.as_str().to_lowercase(),
        name = prospect.client_name,
        service = prospect.service_type,
        count = prospect.approach_count,
        status = prospect.service_status,
        mode = describe_mode(mode),
    )
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Canned message used when no generator is configured or generation fails.
pub fn fallback_message(prospect: &Prospect<'_>, channel: Channel) -> String {
    let greeting = format!("Hi {},", prospect.client_name);
    let service_line = format!(
        "Hope you are doing well. We noticed you are interested in {} services.",
        prospect.service_type
    );
    let offer_line = "We would love to help you grow your business.";

    let closing = match channel {
        Channel::Whatsapp => "Feel free to reach out if you have any questions!",
        Channel::Email => "Best Regards,\nYour Team",
    };

    format!("{greeting}\n\n{service_line}\n\n{offer_line}\n\n{closing}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Prospect<'static> {
        Prospect {
            client_name: "Ana",
            service_type: "SEO",
            website: None,
            approach_count: 2,
            service_status: "INTERESTED",
        }
    }

    #[test]
    fn unknown_tone_and_mode_fall_back() {
        assert_eq!(describe_tone("sarcastic"), "professional");
        assert_eq!(describe_mode("spam"), "professional outreach");
        assert_eq!(describe_tone("soft sales"), "gentle and persuasive without being pushy");
    }

    #[test]
    fn prompt_carries_lead_details() {
        let prompt = build_prompt(&ana(), Channel::Email, "friendly", "reminder");
        assert!(prompt.starts_with("Write a warm and friendly email message"));
        assert!(prompt.contains("- Name: Ana"));
        assert!(prompt.contains("- Website: Not provided"));
        assert!(prompt.contains("- Previous Contact Count: 2 times"));
        assert!(prompt.contains("reminder message for clients who haven't responded"));
        assert!(prompt.contains("(medium length)"));
    }

    #[test]
    fn whatsapp_prompt_asks_for_short_copy() {
        let prompt = build_prompt(&ana(), Channel::Whatsapp, "casual", "cold_outreach");
        assert!(prompt.contains("casual and conversational whatsapp message"));
        assert!(prompt.contains("(short)"));
        assert_eq!(max_tokens_for(Channel::Whatsapp), 200);
    }

    #[test]
    fn fallback_closing_depends_on_channel() {
        let email = fallback_message(&ana(), Channel::Email);
        assert!(email.starts_with("Hi Ana,"));
        assert!(email.contains("interested in SEO services"));
        assert!(email.ends_with("Best Regards,\nYour Team"));

        let whatsapp = fallback_message(&ana(), Channel::Whatsapp);
        assert!(whatsapp.ends_with("Feel free to reach out if you have any questions!"));
    }
}
