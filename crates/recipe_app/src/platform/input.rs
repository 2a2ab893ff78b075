use recipe_core::Msg;

pub const HELP: &str = "\
Type an ingredient to fill the last row.
  +          add an empty row
  + NAME     add a row holding NAME
  N=NAME     set row N
  -N         remove row N
  go         generate a recipe
  help       show this text
  quit       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Msgs(Vec<Msg>),
    Help,
    Quit,
}

/// Translate one line of user input; `row_count` is the number of rows shown.
pub fn parse_line(line: &str, row_count: usize) -> Input {
    let line = line.trim();
    match line {
        "quit" | "exit" => return Input::Quit,
        "help" | "?" => return Input::Help,
        "go" => return Input::Msgs(vec![Msg::Submitted]),
        "" => return Input::Msgs(Vec::new()),
        _ => {}
    }

    if let Some(rest) = line.strip_prefix('+') {
        let name = rest.trim();
        let mut msgs = vec![Msg::IngredientAdded];
        if !name.is_empty() {
            msgs.push(Msg::IngredientEdited {
                index: row_count,
                text: name.to_string(),
            });
        }
        return Input::Msgs(msgs);
    }

    if let Some(index) = line.strip_prefix('-').and_then(parse_row_number) {
        return Input::Msgs(vec![Msg::IngredientRemoved { index }]);
    }

    if let Some((number, text)) = line.split_once('=') {
        if let Some(index) = parse_row_number(number) {
            return Input::Msgs(vec![Msg::IngredientEdited {
                index,
                text: text.trim().to_string(),
            }]);
        }
    }

    Input::Msgs(vec![Msg::IngredientEdited {
        index: row_count.saturating_sub(1),
        text: line.to_string(),
    }])
}

/// Rows are numbered from 1 on screen.
fn parse_row_number(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()?.checked_sub(1)
}
