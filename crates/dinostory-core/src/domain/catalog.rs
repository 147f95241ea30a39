//! Choices offered by the wizard.

/// Dinosaurs offered on the first step.
pub const DINOSAURS: &[&str] = &[
    "Allosaurus",
    "Ankylosaurus",
    "Argentinosaurus",
    "Carnotaurus",
    "Giganotosaurus",
    "Spinosaurus",
    "Stegosaurus",
    "Triceratops",
    "Tyrannosaurus rex",
    "Velociraptor",
];

/// A selectable narrative style card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOption {
    pub key: &'static str,
    pub emoji: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const STYLES: &[StyleOption] = &[
    StyleOption {
        key: "funny",
        emoji: "😄",
        title: "Funny & Playful",
        description: "Laughs and fun all the way through",
    },
    StyleOption {
        key: "adventurous",
        emoji: "🌟",
        title: "Adventurous & Exciting",
        description: "Thrilling quests and discoveries",
    },
    StyleOption {
        key: "gentle",
        emoji: "🌙",
        title: "Gentle & Soothing",
        description: "Peaceful and calming",
    },
    StyleOption {
        key: "magical",
        emoji: "✨",
        title: "Magical & Enchanting",
        description: "Fantasy and wonder",
    },
    StyleOption {
        key: "educational",
        emoji: "📚",
        title: "Educational",
        description: "Fun facts and knowledge",
    },
];

/// A suggested lesson chip. Lessons may also be typed freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonOption {
    pub emoji: &'static str,
    pub text: &'static str,
}

pub const LESSONS: &[LessonOption] = &[
    LessonOption { emoji: "😊", text: "Being kind to others" },
    LessonOption { emoji: "🤝", text: "Sharing is important" },
    LessonOption { emoji: "💪", text: "Being brave when I'm scared" },
    LessonOption { emoji: "🎨", text: "Trying new things" },
    LessonOption { emoji: "❤️", text: "Telling the truth" },
    LessonOption { emoji: "🧠", text: "Listening carefully" },
    LessonOption { emoji: "🧹", text: "Tidying up my toys" },
    LessonOption { emoji: "🌈", text: "Respecting everyone" },
    LessonOption { emoji: "🦕", text: "Asking for help when I need it" },
    LessonOption { emoji: "⭐", text: "Not giving up even when it's hard" },
];

/// Look up a catalog style card by key.
pub fn style_option(key: &str) -> Option<&'static StyleOption> {
    STYLES.iter().find(|option| option.key == key)
}
