use std::fmt;

use anyhow::Result;
use inquire::{InquireError, Select, Text};

use crate::advisor::{Advisor, DifficultyRank, ElementalType};
use crate::dex::Dex;
use crate::llm::TextGenerator;
use crate::screen::{Modal, Phase, Screen};
use crate::view;

enum FormAction {
    EditName,
    PickType,
    PickRank,
    Search,
    Quit,
}

impl fmt::Display for FormAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EditName => "出現ポケモンを入力",
            Self::PickType => "相手のテラスタイプを選択",
            Self::PickRank => "レイド難易度を選択",
            Self::Search => "検索",
            Self::Quit => "終了",
        })
    }
}

enum ResultAction {
    Toggle(usize, String),
    Back,
    Quit,
}

impl fmt::Display for ResultAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toggle(i, name) => write!(f, "{}. {} の詳細を開く/閉じる", i + 1, name),
            Self::Back => f.write_str("← 再検索"),
            Self::Quit => f.write_str("終了"),
        }
    }
}

enum NameChoice {
    Suggestion(usize, String),
    Keep(String),
}

impl fmt::Display for NameChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suggestion(_, name) => f.write_str(name),
            Self::Keep(typed) => write!(f, "「{}」のまま", typed),
        }
    }
}

enum Answer<T> {
    Given(T),
    Skipped,
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

fn cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Esc skips the prompt; Ctrl-C ends the session like the menus do.
fn answer<T>(result: Result<Option<T>, InquireError>) -> Result<Answer<T>> {
    match result {
        Ok(Some(value)) => Ok(Answer::Given(value)),
        Ok(None) => Ok(Answer::Skipped),
        Err(e) if cancelled(&e) => Ok(Answer::Quit),
        Err(e) => Err(e.into()),
    }
}

/// Choices offered under the name prompt. Nothing to offer when the typed
/// name is already the only match.
fn name_choices(screen: &Screen<'_>) -> Vec<NameChoice> {
    let typed = &screen.form().target_name;
    let suggestions = screen.suggestions();
    if suggestions.is_empty() || (suggestions.len() == 1 && suggestions[0].name == *typed) {
        return Vec::new();
    }

    let mut choices: Vec<NameChoice> = suggestions
        .iter()
        .enumerate()
        .map(|(i, e)| NameChoice::Suggestion(i, e.name.clone()))
        .collect();
    choices.push(NameChoice::Keep(typed.clone()));
    choices
}

fn apply_name_choice(screen: &mut Screen<'_>, choice: NameChoice) {
    if let NameChoice::Suggestion(index, _) = choice {
        screen.pick_suggestion(index);
    }
}

fn edit_name(screen: &mut Screen<'_>) -> Result<Flow> {
    let typed = Text::new("出現ポケモン:")
        .with_initial_value(&screen.form().target_name)
        .with_placeholder("ポケモンを入力してください。")
        .prompt_skippable();
    match answer(typed)? {
        Answer::Given(name) => screen.set_target_name(&name),
        Answer::Skipped => return Ok(Flow::Continue),
        Answer::Quit => return Ok(Flow::Quit),
    }

    let choices = name_choices(screen);
    if choices.is_empty() {
        return Ok(Flow::Continue);
    }
    match answer(Select::new("候補:", choices).prompt_skippable())? {
        Answer::Given(choice) => apply_name_choice(screen, choice),
        Answer::Skipped => {}
        Answer::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn run_modal(screen: &mut Screen<'_>) -> Result<Flow> {
    match screen.modal() {
        Modal::Closed => {}
        Modal::TeraType => {
            let picked = Select::new("テラスタイプを選択", ElementalType::ALL.to_vec())
                .with_page_size(9)
                .prompt_skippable();
            match answer(picked)? {
                Answer::Given(t) => screen.choose_tera_type(t),
                Answer::Skipped => screen.close_modal(),
                Answer::Quit => return Ok(Flow::Quit),
            }
        }
        Modal::Rank => {
            let current = DifficultyRank::ALL
                .iter()
                .position(|r| *r == screen.form().rank)
                .unwrap_or_default();
            let picked = Select::new("難易度を選択", DifficultyRank::ALL.to_vec())
                .with_starting_cursor(current)
                .prompt_skippable();
            match answer(picked)? {
                Answer::Given(r) => screen.choose_rank(r),
                Answer::Skipped => screen.close_modal(),
                Answer::Quit => return Ok(Flow::Quit),
            }
        }
    }
    Ok(Flow::Continue)
}

pub async fn run<G: TextGenerator>(dex: &'static Dex, advisor: &Advisor<G>) -> Result<()> {
    let mut screen = Screen::new(dex);
    println!("レイドソロ攻略検索");

    loop {
        if let Some(notice) = screen.take_notice() {
            println!("{}", view::render_notice(notice));
        }

        if let Some(results) = view::render_results(&screen) {
            println!("\n{}", results);
            let mut options: Vec<ResultAction> = match screen.phase() {
                Phase::ResultShown {
                    recommendations, ..
                } => recommendations
                    .iter()
                    .enumerate()
                    .map(|(i, r)| ResultAction::Toggle(i, r.name.clone()))
                    .collect(),
                _ => Vec::new(),
            };
            options.push(ResultAction::Back);
            options.push(ResultAction::Quit);

            match Select::new("操作を選択:", options).prompt() {
                Ok(ResultAction::Toggle(i, _)) => screen.toggle_card(i),
                Ok(ResultAction::Back) => screen.back(),
                Ok(ResultAction::Quit) => break,
                Err(e) if cancelled(&e) => break,
                Err(e) => return Err(e.into()),
            }
            continue;
        }

        let form = screen.form();
        println!(
            "\n出現ポケモン: {} / テラスタイプ: {} / 難易度: {}",
            if form.target_name.is_empty() {
                "-"
            } else {
                form.target_name.as_str()
            },
            form.tera_type.map(ElementalType::label).unwrap_or("選択してください"),
            form.rank
        );

        let actions = vec![
            FormAction::EditName,
            FormAction::PickType,
            FormAction::PickRank,
            FormAction::Search,
            FormAction::Quit,
        ];
        let action = match Select::new("操作を選択:", actions).prompt() {
            Ok(action) => action,
            Err(e) if cancelled(&e) => break,
            Err(e) => return Err(e.into()),
        };

        let flow = match action {
            FormAction::EditName => edit_name(&mut screen)?,
            FormAction::PickType => {
                screen.open_modal(Modal::TeraType);
                run_modal(&mut screen)?
            }
            FormAction::PickRank => {
                screen.open_modal(Modal::Rank);
                run_modal(&mut screen)?
            }
            FormAction::Search => {
                if screen.can_submit() {
                    eprintln!("AIに問い合わせ中...");
                    screen.submit(advisor).await;
                }
                Flow::Continue
            }
            FormAction::Quit => Flow::Quit,
        };
        if let Flow::Quit = flow {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_labels(choices: &[NameChoice]) -> Vec<String> {
        choices.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn typed_prefix_offers_screen_suggestions() {
        let mut screen = Screen::new(Dex::global().unwrap());
        screen.set_target_name("ちゅう");

        let choices = name_choices(&screen);
        assert_eq!(
            choice_labels(&choices),
            vec!["ピカチュウ", "ライチュウ", "「ちゅう」のまま"]
        );

        let second = choices.into_iter().nth(1).unwrap();
        apply_name_choice(&mut screen, second);
        assert_eq!(screen.form().target_name, "ライチュウ");
        assert!(screen.suggestions().is_empty());
    }

    #[test]
    fn keeping_typed_text_leaves_form_alone() {
        let mut screen = Screen::new(Dex::global().unwrap());
        screen.set_target_name("ぴか");

        let keep = name_choices(&screen).pop().unwrap();
        apply_name_choice(&mut screen, keep);
        assert_eq!(screen.form().target_name, "ぴか");
    }

    #[test]
    fn exact_name_needs_no_choice() {
        let mut screen = Screen::new(Dex::global().unwrap());
        screen.set_target_name("ピカチュウ");
        assert!(name_choices(&screen).is_empty());

        screen.set_target_name("ぜんぜんない");
        assert!(name_choices(&screen).is_empty());
    }

    #[test]
    fn interrupt_ends_session_instead_of_failing() {
        assert!(matches!(
            answer::<u8>(Err(InquireError::OperationInterrupted)),
            Ok(Answer::Quit)
        ));
        assert!(matches!(answer::<u8>(Ok(None)), Ok(Answer::Skipped)));
        assert!(matches!(answer(Ok(Some(3u8))), Ok(Answer::Given(3))));
        assert!(answer::<u8>(Err(InquireError::NotTTY)).is_err());
    }
}
