use std::fmt;

use wana_kana::ConvertJapanese;

use crate::advisor::Recommendation;
use crate::dex::ReferenceEntity;
use crate::screen::{Notice, Phase, Screen};

pub fn render_suggestion(entity: &ReferenceEntity) -> String {
    let mut line = format!("{} ({})", entity.name, entity.name.to_romaji());
    if !entity.types.is_empty() {
        line.push_str(&format!(" [{}]", entity.types.join(" / ")));
    }
    line
}

pub fn render_notice(notice: Notice) -> String {
    format!("[{}] {}", notice.title(), notice.message())
}

struct Card<'a> {
    index: usize,
    rec: &'a Recommendation,
    expanded: bool,
}

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toggle = if self.expanded {
            "▲ 閉じる"
        } else {
            "▼ 攻略チャートを見る"
        };
        writeln!(f, "{}. {}  {}", self.index + 1, self.rec.name, toggle)?;
        writeln!(f, "   持ち物: {}", self.rec.held_item)?;

        if self.expanded {
            writeln!(f, "   ■ 採用理由")?;
            writeln!(f, "     {}", self.rec.rationale)?;
            writeln!(f, "   ■ おすすめ技構成")?;
            writeln!(f, "     {}", self.rec.moves.join(" / "))?;
            writeln!(f, "   ■ 立ち回りチャート")?;
            for step in &self.rec.plan {
                writeln!(f, "     {}", step)?;
            }
        }
        Ok(())
    }
}

struct Results<'a> {
    heading: String,
    recommendations: &'a [Recommendation],
    expanded: Option<usize>,
}

impl fmt::Display for Results<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f)?;
        if self.recommendations.is_empty() {
            writeln!(f, "(おすすめが見つかりませんでした)")?;
        }
        for (index, rec) in self.recommendations.iter().enumerate() {
            let card = Card {
                index,
                rec,
                expanded: self.expanded == Some(index),
            };
            writeln!(f, "{}", card)?;
        }
        Ok(())
    }
}

/// Result view text, or `None` when the screen is not showing results.
pub fn render_results(screen: &Screen<'_>) -> Option<String> {
    let Phase::ResultShown {
        recommendations,
        expanded,
        ..
    } = screen.phase()
    else {
        return None;
    };

    let results = Results {
        heading: screen.heading().unwrap_or_default(),
        recommendations,
        expanded: *expanded,
    };
    Some(results.to_string())
}
