//! # Localized Content Table
//!
//! Static per-language widget copy: the welcome line, the quick suggestion
//! chips, and the canned fallback shown when the assistant cannot be reached.
//! Lookups never fail; anything unknown resolves to English.

use chrono::{DateTime, TimeZone};

pub const DEFAULT_LANGUAGE: &str = "en";

/// Writing direction of a language, mirrored by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

/// How message time labels are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// `02:30 PM`
    TwelveHour,
    /// `14:30`
    TwentyFourHour,
}

#[derive(Debug)]
pub struct ContentEntry {
    pub code: &'static str,
    pub welcome: &'static str,
    pub suggestions: &'static [&'static str],
    pub fallback: &'static str,
    pub direction: Direction,
    pub clock: Clock,
}

impl ContentEntry {
    /// Two-digit hour and minute, the way this language's users expect it.
    pub fn format_time<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match self.clock {
            Clock::TwelveHour => at.format("%I:%M %p").to_string(),
            Clock::TwentyFourHour => at.format("%H:%M").to_string(),
        }
    }
}

static CONTENT: &[ContentEntry] = &[
    ContentEntry {
        code: "en",
        welcome: "👋 Hello! I'm your Recrut'der AI assistant. How can I help you today?",
        suggestions: &["How does matching work?", "Pricing plans", "Register as candidate", "I'm a recruiter"],
        fallback: "I'm here to help! You can ask me about our features, pricing, or how to get started. Or contact our support team at support@recrutder.com",
        direction: Direction::Ltr,
        clock: Clock::TwelveHour,
    },
    ContentEntry {
        code: "fr",
        welcome: "👋 Bonjour! Je suis votre assistant IA Recrut'der. Comment puis-je vous aider aujourd'hui?",
        suggestions: &["Comment fonctionne le matching?", "Plans tarifaires", "S'inscrire comme candidat", "Je suis recruteur"],
        fallback: "Je suis là pour vous aider! Vous pouvez me poser des questions sur nos fonctionnalités, tarifs, ou comment commencer. Ou contactez notre support à support@recrutder.com",
        direction: Direction::Ltr,
        clock: Clock::TwentyFourHour,
    },
    ContentEntry {
        code: "es",
        welcome: "👋 ¡Hola! Soy tu asistente de IA Recrut'der. ¿Cómo puedo ayudarte hoy?",
        suggestions: &["¿Cómo funciona el matching?", "Planes de precios", "Registrarse como candidato", "Soy reclutador"],
        fallback: "¡Estoy aquí para ayudar! Puede preguntarme sobre nuestras funciones, precios o cómo empezar. O contacte a nuestro equipo de soporte en support@recrutder.com",
        direction: Direction::Ltr,
        clock: Clock::TwentyFourHour,
    },
    ContentEntry {
        code: "de",
        welcome: "👋 Hallo! Ich bin Ihr Recrut'der KI-Assistent. Wie kann ich Ihnen heute helfen?",
        suggestions: &["Wie funktioniert das Matching?", "Preispläne", "Als Kandidat registrieren", "Ich bin Recruiter"],
        fallback: "Ich bin hier um zu helfen! Sie können mich nach unseren Funktionen, Preisen oder wie Sie beginnen können fragen. Oder kontaktieren Sie unser Support-Team unter support@recrutder.com",
        direction: Direction::Ltr,
        clock: Clock::TwentyFourHour,
    },
    ContentEntry {
        code: "ar",
        welcome: "👋 مرحبا! أنا مساعد الذكاء الاصطناعي Recrut'der. كيف يمكنني مساعدتك اليوم؟",
        suggestions: &["كيف يعمل التطابق؟", "خطط التسعير", "التسجيل كمرشح", "أنا موظف توظيف"],
        fallback: "أنا هنا للمساعدة! يمكنك أن تسألني عن ميزاتنا أو الأسعار أو كيفية البدء. أو اتصل بفريق الدعم لدينا على support@recrutder.com",
        direction: Direction::Rtl,
        clock: Clock::TwentyFourHour,
    },
    ContentEntry {
        code: "zh",
        welcome: "👋 你好！我是您的 Recrut'der AI 助手。今天我能帮您什么？",
        suggestions: &["匹配如何工作？", "价格计划", "注册为候选人", "我是招聘人员"],
        fallback: "我在这里帮助您！您可以问我有关我们的功能、定价或如何开始的问题。或联系我们的支持团队：support@recrutder.com",
        direction: Direction::Ltr,
        clock: Clock::TwentyFourHour,
    },
    ContentEntry {
        code: "pt",
        welcome: "👋 Olá! Sou seu assistente de IA Recrut'der. Como posso ajudá-lo hoje?",
        suggestions: &["Como funciona o matching?", "Planos de preços", "Registrar como candidato", "Sou recrutador"],
        fallback: "Estou aqui para ajudar! Você pode me perguntar sobre nossos recursos, preços ou como começar. Ou entre em contato com nossa equipe de suporte em support@recrutder.com",
        direction: Direction::Ltr,
        clock: Clock::TwentyFourHour,
    },
    ContentEntry {
        code: "ru",
        welcome: "👋 Здравствуйте! Я ваш AI-помощник Recrut'der. Чем могу вам помочь сегодня?",
        suggestions: &["Как работает сопоставление?", "Тарифные планы", "Зарегистрироваться как кандидат", "Я рекрутер"],
        fallback: "Я здесь, чтобы помочь! Вы можете спросить меня о наших функциях, ценах или как начать. Или свяжитесь с нашей службой поддержки по адресу support@recrutder.com",
        direction: Direction::Ltr,
        clock: Clock::TwentyFourHour,
    },
    ContentEntry {
        code: "hi",
        welcome: "👋 नमस्ते! मैं आपका Recrut'der AI सहायक हूं। आज मैं आपकी कैसे मदद कर सकता हूं?",
        suggestions: &["मैचिंग कैसे काम करती है?", "मूल्य निर्धारण योजनाएं", "उम्मीदवार के रूप में पंजीकरण करें", "मैं एक रिक्रूटर हूं"],
        fallback: "मैं मदद के लिए यहाँ हूँ! आप मुझसे हमारी सुविधाओं, मूल्य निर्धारण या कैसे शुरू करें के बारे में पूछ सकते हैं। या support@recrutder.com पर हमारी सहायता टीम से संपर्क करें",
        direction: Direction::Ltr,
        clock: Clock::TwelveHour,
    },
    ContentEntry {
        code: "bn",
        welcome: "👋 হ্যালো! আমি আপনার Recrut'der AI সহায়ক। আজ আমি আপনাকে কীভাবে সাহায্য করতে পারি?",
        suggestions: &["ম্যাচিং কিভাবে কাজ করে?", "মূল্য পরিকল্পনা", "প্রার্থী হিসাবে নিবন্ধন করুন", "আমি একজন নিয়োগকর্তা"],
        fallback: "আমি সাহায্য করতে এখানে আছি! আপনি আমাকে আমাদের বৈশিষ্ট্য, মূল্য বা কীভাবে শুরু করবেন সে সম্পর্কে জিজ্ঞাসা করতে পারেন। অথবা support@recrutder.com এ আমাদের সাপোর্ট টিমের সাথে যোগাযোগ করুন",
        direction: Direction::Ltr,
        clock: Clock::TwelveHour,
    },
];

/// Codes with an entry in the table, in menu order.
pub fn supported_languages() -> impl Iterator<Item = &'static str> {
    CONTENT.iter().map(|entry| entry.code)
}

/// Exact lookup after normalization, then by primary subtag (`pt-BR` → `pt`).
pub fn find(code: &str) -> Option<&'static ContentEntry> {
    let normalized = code.trim().to_ascii_lowercase().replace('_', "-");
    let primary = normalized.split('-').next().unwrap_or_default();
    CONTENT
        .iter()
        .find(|entry| entry.code == normalized)
        .or_else(|| CONTENT.iter().find(|entry| entry.code == primary))
}

/// Content for `code`, or English when the table has no entry for it.
pub fn lookup(code: &str) -> &'static ContentEntry {
    find(code).unwrap_or(&CONTENT[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_default_language_is_first_entry() {
        assert_eq!(CONTENT[0].code, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_every_entry_has_four_suggestions() {
        for entry in CONTENT {
            assert_eq!(entry.suggestions.len(), 4, "language {}", entry.code);
            assert!(entry.fallback.contains("support@recrutder.com"), "language {}", entry.code);
        }
    }

    #[test]
    fn test_english_content() {
        let en = lookup("en");
        assert_eq!(
            en.welcome,
            "👋 Hello! I'm your Recrut'der AI assistant. How can I help you today?"
        );
        assert_eq!(
            en.suggestions,
            &["How does matching work?", "Pricing plans", "Register as candidate", "I'm a recruiter"]
        );
    }

    #[test]
    fn test_unknown_code_falls_back_to_english() {
        assert_eq!(lookup("xx").code, "en");
        assert_eq!(lookup("").code, "en");
        assert!(find("xx").is_none());
    }

    #[test]
    fn test_lookup_normalizes_code() {
        assert_eq!(lookup("FR").code, "fr");
        assert_eq!(lookup(" de ").code, "de");
        assert_eq!(lookup("pt-BR").code, "pt");
        assert_eq!(lookup("zh_CN").code, "zh");
    }

    #[test]
    fn test_arabic_is_right_to_left() {
        assert_eq!(lookup("ar").direction, Direction::Rtl);
        assert_eq!(lookup("en").direction, Direction::Ltr);
    }

    #[test]
    fn test_supported_languages_lists_all() {
        let codes: Vec<&str> = supported_languages().collect();
        assert_eq!(codes, vec!["en", "fr", "es", "de", "ar", "zh", "pt", "ru", "hi", "bn"]);
    }

    #[test]
    fn test_format_time_by_clock() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let at = tz.with_ymd_and_hms(2026, 1, 5, 14, 30, 0).unwrap();
        assert_eq!(lookup("en").format_time(&at), "02:30 PM");
        assert_eq!(lookup("fr").format_time(&at), "14:30");
    }
}
