// The compiled-in Sprite Quest curriculum.
// Level ids keep their original numbering; gaps are quests that were retired.

use super::level::{Level, LevelKind, Module};

pub fn sprite_quest() -> Vec<Module> {
    use LevelKind::*;
    vec![
        Module::new(
            "module-1",
            "🚀 Quest 1: Moving Around",
            vec![
                Level::new(
                    "1.2",
                    "Level 1: Treasure Hunt 💎",
                    "Help the cat find the hidden treasure!",
                    Project,
                    "COORDINATE_GAME",
                    300,
                ),
                Level::new(
                    "1.3",
                    "Level 2: Secret Map Game 🗺️",
                    "Do you know the secret paths?",
                    Quiz,
                    "QUIZ_COORDINATES",
                    150,
                ),
            ],
        ),
        Module::new(
            "module-2",
            "✨ Quest 2: Magic Buttons",
            vec![
                Level::new(
                    "2.2",
                    "Level 1: Make a Dance 💃",
                    "Click buttons to make the cat move!",
                    Project,
                    "EVENTS_GAME",
                    400,
                ),
                Level::new(
                    "2.3",
                    "Level 2: Matching Game 🧩",
                    "Find the blocks that look the same!",
                    Quiz,
                    "QUIZ_EVENTS",
                    150,
                ),
            ],
        ),
        Module::new(
            "module-3",
            "🤖 Quest 3: Robot Fun",
            vec![
                Level::new(
                    "3.1",
                    "Level 1: Do It Again! 🔁",
                    "Make the robot dance forever and ever!",
                    Project,
                    "LOOP_GAME_EASY",
                    250,
                ),
                Level::new(
                    "3.2",
                    "Level 2: Robot Loop Game ⚙️",
                    "Show off your robot skills!",
                    Quiz,
                    "QUIZ_MODULE_3",
                    150,
                ),
                Level::new(
                    "3.3",
                    "Level 3: Smart Robot 🧠",
                    "Help the robot find the walls!",
                    Project,
                    "CONDITION_GAME_EASY",
                    300,
                ),
                Level::new(
                    "3.4",
                    "Level 4: Super Brain Game 💡",
                    "Are you a master coder?",
                    Quiz,
                    "QUIZ_CONDITIONS",
                    150,
                ),
            ],
        ),
        Module::new(
            "module-6",
            "🎨 Quest 6: Creative Master",
            vec![
                Level::new(
                    "6.1",
                    "Level 1: The Big Finale 🏆",
                    "Combine motion, loops, and logic to create something amazing!",
                    Project,
                    "CREATIVE_GAME",
                    500,
                ),
                Level::new(
                    "6.2",
                    "Level 2: Master Coder Game 🌟",
                    "Show us what you learned in your journey!",
                    Quiz,
                    "QUIZ_MODULE_6",
                    200,
                ),
            ],
        ),
    ]
}
