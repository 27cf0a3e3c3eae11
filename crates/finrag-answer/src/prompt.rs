//! Grounding prompt assembly.

use finrag_core::types::ScoredFragment;

/// Render the grounding instruction handed to the chat model.
///
/// Wording and per-record field order are fixed: downstream citation
/// matching parses `(chunk: chunk_id)` markers out of the model reply,
/// and the fallback sentence is compared verbatim.
pub fn build_prompt(question: &str, retrieved: &[ScoredFragment]) -> String {
    let mut context = String::new();
    for hit in retrieved {
        context.push_str(&format!(
            "\n\n---\nChunk ID: {}\nSource: {}\nText:\n{}\n",
            hit.id, hit.source, hit.text
        ));
    }

    format!(
        "\nUse ONLY the information in the retrieved chunks. If the answer is not found, say: \"The documents do not contain this information.\"\nCite your evidence using (chunk: chunk_id).\n\nQuestion:\n{question}\nContext:\n{context}\n"
    )
}
