//! The built-in feature catalog.

use super::{FeatureDefinition, SpecialEffect, StatIncrease};
use crate::stats::Stat;

/// The predefined features every registry starts with, in display order.
pub fn builtin_definitions() -> Vec<FeatureDefinition> {
    vec![
        FeatureDefinition {
            name: "Veteran".to_string(),
            stat_increase: StatIncrease::ChooseOne(vec![Stat::Might, Stat::Agility]),
            description: VETERAN_DESCRIPTION.to_string(),
            special: None,
        },
        FeatureDefinition {
            name: "Knave".to_string(),
            stat_increase: StatIncrease::Fixed(Stat::Agility),
            description: KNAVE_DESCRIPTION.to_string(),
            special: None,
        },
        FeatureDefinition {
            name: "Scholar".to_string(),
            stat_increase: StatIncrease::Fixed(Stat::Mind),
            description: SCHOLAR_DESCRIPTION.to_string(),
            special: Some(SpecialEffect::UnlockMana),
        },
        FeatureDefinition {
            name: "Charlatan".to_string(),
            stat_increase: StatIncrease::Fixed(Stat::Will),
            description: CHARLATAN_DESCRIPTION.to_string(),
            special: None,
        },
        FeatureDefinition {
            name: "Wanderer".to_string(),
            stat_increase: StatIncrease::GrantAll(Stat::ALL.to_vec()),
            description: WANDERER_DESCRIPTION.to_string(),
            special: Some(SpecialEffect::GrantLanguage("Primordial".to_string())),
        },
    ]
}

const VETERAN_DESCRIPTION: &str = concat!(
    "A veteran has seen combat before, and has the scars and knowledge of a life led in combat. Veterans come from diverse backgrounds, from bandits to town guards to once renowned heroes who have now faded into obscurity. No matter the source, veterans are proficient combat specialists.\n",
    "\n",
    "- Every attack deals an additional damage.\n",
    "- Survey Action: 1 Round, choose a creature, you learn the value of one statistic of your choosing, a random weakness or resistance, or the information of one action you have seen them perform.\n",
    "- Block Action: X Stamina, choosing an amount of stamina to expend, you gain temporary health equal to the stamina expended. This block goes away at the end of your next turn.",
);

const KNAVE_DESCRIPTION: &str = concat!(
    "A Knave is a trickster, who often makes their life’s earnings swindling people and can be found in all walks of life. From the humble street pick-pocket to a crook whispering in a king's ear. Knaves are remarkably skilled in quiet movement, theft, and avoiding the victims of their exploits. Knaves are not necessarily evil, but are looked down on by more honest folk.\n",
    "\n",
    "- When attacking an opponent who is unaware of your presence, or who you’re flanking, deal double damage.\n",
    "- Annoy Action: 1 Round, choose a creature, you distract them with loud noises, pocket sand, or other distracting stimulus. Force the creature to turn towards you until the start of your next turn.\n",
    "- Hide Action: X Stamina, hide from those around, any creature with Mind lower than the stamina you expended to hide cannot target you with any action. This lasts until the start of your next turn. Any action that would affect another creature alerts them to your position removes the benefit of this action until you attempt to hide again.",
);

const SCHOLAR_DESCRIPTION: &str = concat!(
    "Scholars are almost always found in high society. Clustered to the ultra wealthy, these people come from nobility and have been given the privilege of a life surrounded by books, scrolls, and academia. Some scholars flee into the wilderness to research without supervision, and occasionally accept pupils from smaller villages, but the surroundings eventually degrade the quality of the research done, and lead more interested youth to pursue a life of a scribe to higher born people.\n",
    "\n",
    "- You gain a new derived stat, Mana. Mana is calculated by 3*Mind. Mana is restored during daily preparations.\n",
    "- Sparks: 1 Stamina X Mana, choose a creature within 15 spaces, they take X magic damage.\n",
    "- Research Action: 1 Workday, 100-Mind % chance to discover a new piece of lore related to what you are researching. Requires access to a library or populated town.",
);

const CHARLATAN_DESCRIPTION: &str = concat!(
    "Charlatans are similar to knaves, except they invest more in the mind over the body of theft. Charlatans will often be seen as loan sharks, gang leaders, or cheats. However, Charlatans are most successful in the open as diplomats. Tricky contracts and deals have bankrupted more kingdoms and ruined more lives than even the most influential cheat. Mind games and battles of will are a Charlatans bread and butter, and they naturally gravitate towards leading those with lower wills.\n",
    "\n",
    "- Your grit restores at the beginning of every round.\n",
    "- Belittle Action: 2 Stamina X Grit, choose a creature within range. If the creature can understand a language you speak, you shout harassments at it. Reduce their Grit by X. Once a creature has zero grit, this attack lowers the target’s will by half of X, while they are reduced to zero will, the creature obeys your commands and ignores other creature’s commands or pleas.\n",
    "- Inspire Action: 2 Stamina X Grit, choose a creature within range, restore the creature’s Grit. Any Grit exceeding their maximum is kept as temporary Grit.",
);

const WANDERER_DESCRIPTION: &str = concat!(
    "Wanderers have shirked the burdens of society and left to indulge in their own whims and wiles. Wanderers come from all walks of life, though tragedy of some form seems to hang over near all of them. It is said that any soul who lacks a place in the world finds a family in the groups of others who have left the world behind. A special language that transcends boundaries of land or life is known by all, and is said to be the root of most other languages, based on how quickly everyone seems to pick it up.\n",
    "\n",
    "- You learn the language “Primordial” and can leave hidden messages with it, only noticeable to others who know this language.\n",
    "- Aid Action: 1 Round, restore a value equal to your Will to a number of creatures equal to your Mind within 15 spaces to any derived stat of your choosing.\n",
    "- Steal Action: X Stamina, choose a creature within 5 spaces of you and a base stat. The target’s base stat is reduced and your base stat is improved by half of X. The target's base stat can not be reduced below 1. This effect lasts until the beginning of your next turn.",
);
