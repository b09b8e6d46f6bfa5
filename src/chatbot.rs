/// Answers free-text fitness questions
pub trait Chatbot: Send + Sync {
    fn answer(&self, question: &str) -> String;
}

const FALLBACK_ANSWER: &str = "I'm not sure about that one. Try asking about exercise, \
nutrition, calories, sleep, hydration or weight management.";

struct Topic {
    keywords: &'static [&'static str],
    answer: &'static str,
}

const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["exercise", "workout", "training", "cardio"],
        answer: "Regular exercise strengthens your heart and muscles, improves mood and sleep, \
                 and lowers the risk of chronic disease. Aim for at least 150 minutes of moderate \
                 activity a week plus two strength sessions.",
    },
    Topic {
        keywords: &["calorie", "calories"],
        answer: "Your daily calorie needs depend on age, sex, weight, height and activity level. \
                 Log what you eat and burn to see how you track against your goal.",
    },
    Topic {
        keywords: &["diet", "nutrition", "protein", "eat", "food", "meal"],
        answer: "Build meals around vegetables, lean protein, whole grains and healthy fats, \
                 and keep added sugar and highly processed food to a minimum.",
    },
    Topic {
        keywords: &["weight", "lose", "gain", "bmi"],
        answer: "Sustainable weight change comes from a modest calorie deficit or surplus combined \
                 with regular activity. Around 0.5 kg per week is a realistic pace.",
    },
    Topic {
        keywords: &["sleep", "rest", "recovery"],
        answer: "Most adults need 7 to 9 hours of sleep. Rest days let muscles recover and reduce \
                 injury risk.",
    },
    Topic {
        keywords: &["water", "hydration", "drink"],
        answer: "Drink water throughout the day and more when you exercise or it is hot. Pale \
                 yellow urine is a good sign you are well hydrated.",
    },
    Topic {
        keywords: &["event", "events", "enroll", "class"],
        answer: "Browse upcoming events on the events page and enroll in the ones you like; \
                 they will show up under your registered events.",
    },
];

/// Keyword-matched canned answers with a fixed fallback
#[derive(Default)]
pub struct KeywordChatbot;

impl KeywordChatbot {
    pub fn new() -> Self {
        Self
    }
}

impl Chatbot for KeywordChatbot {
    fn answer(&self, question: &str) -> String {
        let question = question.to_lowercase();
        let words: Vec<&str> = question
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        TOPICS
            .iter()
            .find(|topic| topic.keywords.iter().any(|k| words.contains(k)))
            .map(|topic| topic.answer.to_string())
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_answer() {
        let bot = KeywordChatbot::new();
        let answer = bot.answer("What are some benefits of exercise?");
        assert!(answer.contains("exercise"));
    }

    #[test]
    fn test_fallback_is_never_empty() {
        let bot = KeywordChatbot::new();
        assert_eq!(bot.answer("Tell me about quantum physics"), FALLBACK_ANSWER);
        assert!(!bot.answer("?").is_empty());
    }
}
