#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Audio,
    Video,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Audio, Tier::Video];

    pub fn parse(value: &str) -> Option<Tier> {
        match value {
            "audio" => Some(Tier::Audio),
            "video" => Some(Tier::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Audio => "audio",
            Tier::Video => "video",
        }
    }
}
