//! Rendering of inference results

use crate::config::OutputFormat;
use modeinfer_core::{Collection, CompressedDataset, RankEntry, SymbolRanks, TypeInference};
use serde::Serialize;

/// One slot in JSON output
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SlotRecord {
    pub slot: String,
    pub head: u32,
    pub position: u32,
    #[serde(rename = "type")]
    pub type_id: u32,
}

#[derive(Serialize, Debug)]
struct RankTables {
    heads: Vec<RankEntry>,
    constants: Vec<RankEntry>,
}

pub fn slot_records(inference: &TypeInference, symbolic: bool) -> Vec<SlotRecord> {
    inference
        .types
        .iter()
        .map(|(slot, type_id)| SlotRecord {
            slot: if symbolic { inference.slot_name(slot) } else { slot.to_string() },
            head: slot.head.as_u32(),
            position: slot.position,
            type_id: type_id.as_u32(),
        })
        .collect()
}

pub fn render_types(
    inference: &TypeInference,
    format: OutputFormat,
    symbolic: bool,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => {
            let lines =
                if symbolic { inference.symbolic_lines() } else { inference.lines() };
            Ok(join_lines(lines))
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&slot_records(inference, symbolic))?;
            json.push('\n');
            Ok(json)
        }
    }
}

pub fn render_ranks(ranks: &SymbolRanks, format: OutputFormat) -> serde_json::Result<String> {
    let tables = RankTables { heads: ranks.heads.entries(), constants: ranks.constants.entries() };
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (title, entries) in [("heads", &tables.heads), ("constants", &tables.constants)] {
                out.push_str(&format!("% {title}\n"));
                for entry in entries {
                    out.push_str(&format!("{} {} {}\n", entry.code, entry.symbol, entry.count));
                }
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&tables)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// All three collections, each under a `% <name>` header line
pub fn render_compressed(compressed: &CompressedDataset) -> String {
    let mut out = String::new();
    for collection in Collection::ALL {
        out.push_str(&format!("% {collection}\n"));
        out.push_str(&compressed.render(collection));
    }
    out
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use modeinfer_core::{Dataset, GroundAtom, TypeInferencePipeline, compress_dataset};

    fn friends() -> (Dataset, TypeInference) {
        let dataset = Dataset::new(
            vec![GroundAtom::new("male", ["bob"])],
            vec![GroundAtom::new("friends", ["alice", "bob"])],
            vec![],
        );
        let inference = TypeInferencePipeline::new().without_hook().run(&dataset).unwrap();
        (dataset, inference)
    }

    #[test]
    fn test_text_output() {
        let (_, inference) = friends();
        assert_eq!(
            render_types(&inference, OutputFormat::Text, false).unwrap(),
            "0_0 0\n0_1 1\n1_0 1\n"
        );
        assert_eq!(
            render_types(&inference, OutputFormat::Text, true).unwrap(),
            "friends_0 0\nfriends_1 1\nmale_0 1\n"
        );
    }

    #[test]
    fn test_json_output() {
        let (_, inference) = friends();
        let json = render_types(&inference, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value[2],
            serde_json::json!({ "slot": "1_0", "head": 1, "position": 0, "type": 1 })
        );

        let records = slot_records(&inference, true);
        assert_eq!(records[0].slot, "friends_0");
    }

    #[test]
    fn test_rank_tables() {
        let (_, inference) = friends();
        let text = render_ranks(&inference.ranks, OutputFormat::Text).unwrap();
        assert_eq!(text, "% heads\n0 friends 1\n1 male 1\n% constants\n0 bob 2\n1 alice 1\n");

        let json = render_ranks(&inference.ranks, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["constants"][0]["symbol"], "bob");
    }

    #[test]
    fn test_compressed_sections() {
        let (dataset, inference) = friends();
        let compressed = compress_dataset(&dataset, &inference.ranks).unwrap();
        assert_eq!(
            render_compressed(&compressed),
            "% facts\n1,0\n% positives\n0,1,0\n% negatives\n"
        );
    }
}
