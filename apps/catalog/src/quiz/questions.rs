use serde::Serialize;

use crate::quiz::scores::ScoreVector;

#[derive(Debug, Serialize)]
pub struct QuizOption {
    pub id: &'static str,
    pub label: &'static str,
    pub scores: ScoreVector,
}

#[derive(Debug, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [QuizOption],
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&'static QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

const fn opt(id: &'static str, label: &'static str, scores: ScoreVector) -> QuizOption {
    QuizOption { id, label, scores }
}

// Contributions are (energy, social, routine, attention, playfulness), each in -2..=2.
pub static QUESTIONS: [Question; 8] = [
    Question {
        id: "weekend",
        prompt: "How do you like to spend a free weekend?",
        options: &[
            opt("weekend_outdoors", "Out on a hike or an adventure", ScoreVector::new(2, 1, -1, 0, 1)),
            opt("weekend_hosting", "Hosting friends at home", ScoreVector::new(1, 2, -1, 1, 1)),
            opt("weekend_reading", "Curled up with a book", ScoreVector::new(-2, -1, 1, -1, -1)),
            opt("weekend_errands", "Chores and errands, on schedule", ScoreVector::new(0, 0, 2, 0, -1)),
        ],
    },
    Question {
        id: "home",
        prompt: "Which best describes your home?",
        options: &[
            opt("home_bustling", "Busy, with people coming and going", ScoreVector::new(1, 2, -2, 1, 1)),
            opt("home_calm", "Calm and quiet", ScoreVector::new(-2, -1, 1, -1, -1)),
            opt("home_small", "A small flat I am rarely in", ScoreVector::new(-1, -2, 0, -2, 0)),
            opt("home_family", "A family home with a steady rhythm", ScoreVector::new(0, 1, 2, 1, 1)),
        ],
    },
    Question {
        id: "time",
        prompt: "How much time can you spend with a cat each day?",
        options: &[
            opt("time_lots", "Several hours", ScoreVector::new(1, 1, 0, 2, 1)),
            opt("time_some", "An hour or two", ScoreVector::new(0, 0, 1, 0, 0)),
            opt("time_little", "Not much at all", ScoreVector::new(-1, -1, 0, -2, -1)),
        ],
    },
    Question {
        id: "play",
        prompt: "What does ideal playtime look like?",
        options: &[
            opt("play_fetch", "Fetch and chase games", ScoreVector::new(2, 0, 0, 1, 2)),
            opt("play_puzzle", "Puzzle feeders it solves on its own", ScoreVector::new(0, -1, 0, -1, 2)),
            opt("play_cuddles", "Cuddles instead of play", ScoreVector::new(-2, 1, 1, 1, -2)),
            opt("play_watch", "Watching it explore", ScoreVector::new(1, -1, 0, -1, 0)),
        ],
    },
    Question {
        id: "voice",
        prompt: "How do you feel about a talkative cat?",
        options: &[
            opt("voice_love", "I love the conversation", ScoreVector::new(1, 2, 0, 2, 1)),
            opt("voice_fine", "Occasional chatter is fine", ScoreVector::new(0, 0, 0, 0, 0)),
            opt("voice_quiet", "I prefer peace and quiet", ScoreVector::new(-1, -1, 1, -2, -1)),
        ],
    },
    Question {
        id: "schedule",
        prompt: "What is your daily schedule like?",
        options: &[
            opt("schedule_fixed", "The same every day", ScoreVector::new(-1, 0, 2, 0, -1)),
            opt("schedule_flexible", "Mostly flexible", ScoreVector::new(1, 1, -1, 0, 1)),
            opt("schedule_chaotic", "Never the same twice", ScoreVector::new(2, -1, -2, -1, 1)),
        ],
    },
    Question {
        id: "greeting",
        prompt: "When you come home, you would like your cat to...",
        options: &[
            opt("greeting_door", "Run to meet you at the door", ScoreVector::new(1, 2, 0, 2, 1)),
            opt("greeting_perch", "Notice you from its perch", ScoreVector::new(-1, -1, 1, -1, -1)),
            opt("greeting_toy", "Bring you a toy", ScoreVector::new(2, 0, 0, 1, 2)),
            opt("greeting_nap", "Keep napping", ScoreVector::new(-2, -2, 1, -2, -1)),
        ],
    },
    Question {
        id: "experience",
        prompt: "How much experience do you have with cats?",
        options: &[
            opt("experience_first", "This would be my first cat", ScoreVector::new(-1, 1, 1, 0, 0)),
            opt("experience_some", "I have had cats before", ScoreVector::new(0, 0, 0, 0, 1)),
            opt("experience_expert", "I have raised demanding breeds", ScoreVector::new(2, 0, -1, 1, 1)),
        ],
    },
];
