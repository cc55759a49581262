//! Random problem selection and note decoding.

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::archive::Collection;
use crate::error::Result;
use crate::text;
use crate::types::{Problem, TemplateKind};

/// Draw one presentable problem from the deck with the given full name.
///
/// Returns `Ok(None)` when the deck does not exist, has no cards, or the
/// drawn note's template is not recognized; callers treat all three as
/// "pick again".
pub fn choose_from_deck<R: Rng + ?Sized>(
    collection: &Collection,
    deck_name: &str,
    rng: &mut R,
) -> Result<Option<Problem>> {
    let decks = collection.decks()?;
    let Some(deck_id) = decks
        .iter()
        .find(|(_, deck)| deck.name == deck_name)
        .map(|(id, _)| *id)
    else {
        debug!(deck = deck_name, "no deck with that name");
        return Ok(None);
    };

    let note_ids = collection.note_ids_in_deck(deck_id)?;
    let Some(&note_id) = note_ids.choose(rng) else {
        debug!(deck = deck_name, "deck has no cards");
        return Ok(None);
    };

    let Some(note) = collection.note(note_id)? else {
        // A card row pointed at a note that no longer exists.
        return Ok(None);
    };

    let models = collection.models()?;
    let kind = models
        .get(&note.model_id)
        .map(|model| TemplateKind::from_model_name(&model.name))
        .unwrap_or(TemplateKind::Other);

    Ok(decode_note(kind, &note.fields))
}

/// Decode split note fields into a problem according to the template kind.
///
/// Basic notes use fields 0 and 1 and ignore the rest; cloze notes project
/// field 0 twice. None means the note cannot be presented.
fn decode_note(kind: TemplateKind, fields: &[String]) -> Option<Problem> {
    let (question, answer) = match kind {
        TemplateKind::Cloze => {
            let cloze = fields.first()?;
            (text::cloze_question(cloze), text::cloze_answer(cloze))
        }
        TemplateKind::Basic if fields.len() >= 2 => (fields[0].clone(), fields[1].clone()),
        _ => return None,
    };

    Some(Problem {
        question: text::strip_markup(&question),
        answer: text::strip_markup(&answer),
    })
}
