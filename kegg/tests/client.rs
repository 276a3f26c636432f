//! Client operations against a scripted transport.

use kegg::testing::MockTransport;
use kegg::{Error, Kegg, MemoryCache, NoCache, Segment};

const BASE: &str = "http://rest.kegg.jp";

fn url(path: &str) -> String {
    format!("{BASE}/{path}")
}

#[test]
fn test_list_one_element() {
    let transport = MockTransport::new().respond(
        url("list/pathway"),
        "\n     path:path0000\ttest path\n     ",
    );
    let kegg = Kegg::with_transport(transport);

    let listing = kegg.list(&mut NoCache, "pathway", None).unwrap();

    assert_eq!(listing.len(), 1);
    assert_eq!(listing["path:path0000"], "test path");
}

#[test]
fn test_list_no_elements() {
    let transport = MockTransport::new().respond(url("list/pathway"), "\n     ");
    let kegg = Kegg::with_transport(transport);

    let listing = kegg.list(&mut NoCache, "pathway", None).unwrap();

    assert!(listing.is_empty());
}

#[test]
fn test_list_two_elements_for_organism() {
    let transport = MockTransport::new().respond(
        url("list/pathway/hsa"),
        "path:hsa00010\tGlycolysis - Homo sapiens\npath:hsa00020\tCitrate cycle - Homo sapiens\n",
    );
    let kegg = Kegg::with_transport(transport);

    let listing = kegg.list(&mut NoCache, "pathway", Some("hsa")).unwrap();

    assert_eq!(
        listing.keys().collect::<Vec<_>>(),
        vec!["path:hsa00010", "path:hsa00020"]
    );
}

#[test]
fn test_list_entries_are_joined() {
    let transport = MockTransport::new().respond(
        url("list/cpd:C01290+gl:G00092"),
        "cpd:C01290\tLactosylceramide\ngl:G00092\tGlycan\n",
    );
    let kegg = Kegg::with_transport(transport);

    let listing = kegg
        .list(&mut NoCache, vec!["cpd:C01290", "gl:G00092"], None)
        .unwrap();

    assert_eq!(listing.len(), 2);
}

#[test]
fn test_list_rows_keeps_all_columns() {
    let transport = MockTransport::new().respond(
        url("list/organism"),
        "T01001\thsa\tHomo sapiens (human)\tEukaryotes;Animals;Vertebrates;Mammals\n",
    );
    let kegg = Kegg::with_transport(transport);

    let rows = kegg.list_rows(&mut NoCache, "organism", None).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 4);
    assert_eq!(rows[0][1], "hsa");

    assert!(matches!(
        kegg.list(&mut NoCache, "organism", None),
        Err(Error::MalformedRelation { .. })
    ));
}

#[test]
fn test_find_with_option() {
    let transport = MockTransport::new().respond(
        url("find/compound/300-310/mol_weight"),
        "cpd:C00051\t307.32\ncpd:C00147\t305.31\n",
    );
    let kegg = Kegg::with_transport(transport);

    let found = kegg
        .find(&mut NoCache, "compound", "300-310", Some("mol_weight"))
        .unwrap();

    assert_eq!(found["cpd:C00051"], "307.32");
}

#[test]
fn test_find_joins_terms() {
    let transport = MockTransport::new().respond(
        url("find/genes/shiga+toxin"),
        "ece:Z1464\tstx2A; shiga-like toxin II A subunit\n",
    );
    let kegg = Kegg::with_transport(transport);

    let found = kegg
        .find(&mut NoCache, "genes", Segment::from(["shiga", "toxin"]), None)
        .unwrap();

    assert!(found.contains_key("ece:Z1464"));
}

#[test]
fn test_link_builds_both_directions() {
    let transport = MockTransport::new().respond(
        url("link/pathway/hsa"),
        "hsa:10327\tpath:hsa00010\nhsa:10327\tpath:hsa00040\nhsa:124\tpath:hsa00010\n",
    );
    let kegg = Kegg::with_transport(transport);

    let (gene_to_path, path_to_gene) = kegg.link(&mut NoCache, "pathway", "hsa").unwrap();

    assert_eq!(gene_to_path.get("hsa:10327"), ["path:hsa00010", "path:hsa00040"]);
    assert_eq!(path_to_gene.get("path:hsa00010"), ["hsa:10327", "hsa:124"]);
    assert!(path_to_gene.get("path:hsa99999").is_empty());
}

#[test]
fn test_conv_builds_both_directions() {
    let transport = MockTransport::new().respond(
        url("conv/ncbi-geneid/hsa:10458+ece:Z5100"),
        "hsa:10458\tncbi-geneid:10458\nece:Z5100\tncbi-geneid:957097\n",
    );
    let kegg = Kegg::with_transport(transport);

    let (kegg_to_ncbi, ncbi_to_kegg) = kegg
        .conv(&mut NoCache, "ncbi-geneid", vec!["hsa:10458", "ece:Z5100"])
        .unwrap();

    assert_eq!(kegg_to_ncbi.get("ece:Z5100"), ["ncbi-geneid:957097"]);
    assert_eq!(ncbi_to_kegg.get("ncbi-geneid:10458"), ["hsa:10458"]);
}

#[test]
fn test_link_rejects_malformed_lines() {
    let transport =
        MockTransport::new().respond(url("link/pathway/hsa"), "hsa:10327\tpath:hsa00010\nhsa:1\n");
    let kegg = Kegg::with_transport(transport);

    assert!(matches!(
        kegg.link(&mut NoCache, "pathway", "hsa"),
        Err(Error::MalformedRelation { .. })
    ));
}

#[test]
fn test_get_parses_record_and_references() {
    let body = "\
ENTRY       map00010                    Pathway
NAME        Glycolysis / Gluconeogenesis
CLASS       Metabolism; Carbohydrate metabolism
REFERENCE   PMID:12345
  AUTHORS   Doe J, Roe R
  TITLE     On glycolysis
  JOURNAL   J Biochem 1:1-10 (2000)
///
";
    let transport = MockTransport::new().respond(url("get/map00010"), body);
    let kegg = Kegg::with_transport(transport);

    let record = kegg.get(&mut NoCache, "map00010", None, true).unwrap();

    assert_eq!(record.first("ENTRY"), Some("map00010                    Pathway"));
    assert_eq!(record.first("NAME"), Some("Glycolysis / Gluconeogenesis"));
    let references = record.references().unwrap();
    assert_eq!(references["PMID:12345"].title, "TITLE     On glycolysis");
}

#[test]
fn test_get_raw_with_option() {
    let transport =
        MockTransport::new().respond(url("get/hsa:10458/aaseq"), ">hsa:10458\nMSLRVHTLPTLL\n");
    let kegg = Kegg::with_transport(transport);

    let fasta = kegg
        .get_raw(&mut NoCache, "hsa:10458", Some("aaseq"))
        .unwrap();

    assert!(fasta.starts_with(">hsa:10458"));
}

#[test]
fn test_get_brite() {
    let transport = MockTransport::new().respond(
        url("get/br:br08901"),
        "+C\tMap number\n#<h2>KEGG pathway maps</h2>\n!\nAMetabolism\nB  Global and overview maps\nC    01100  Metabolic pathways\n!\n",
    );
    let kegg = Kegg::with_transport(transport);

    let tree = kegg.get_brite(&mut NoCache, "br:br08901").unwrap();

    assert_eq!(
        tree["Metabolism"]["Global and overview maps"]["01100"],
        "Metabolic pathways"
    );
}

#[test]
fn test_info_is_raw() {
    let transport = MockTransport::new().respond(url("info/kegg"), "kegg             Kyoto Encyclopedia\n");
    let kegg = Kegg::with_transport(transport);

    let info = kegg.info(&mut NoCache, "kegg").unwrap();

    assert!(info.contains("Kyoto Encyclopedia"));
}

#[test]
fn test_cached_operation_makes_one_request() {
    let transport = MockTransport::new().respond(url("list/pathway"), "path:map00010\tGlycolysis\n");
    let kegg = Kegg::with_transport(transport);
    let mut cache = MemoryCache::new();

    let first = kegg.list(&mut cache, "pathway", None).unwrap();
    let second = kegg.list(&mut cache, "pathway", None).unwrap();

    assert_eq!(first, second);
    assert_eq!(kegg.transport().call_count(), 1);
    assert!(cache.contains(&url("list/pathway")));
}

#[test]
fn test_cache_is_shared_by_url_across_operations() {
    let transport = MockTransport::new().respond(url("list/pathway"), "path:map00010\tGlycolysis\n");
    let kegg = Kegg::with_transport(transport);
    let mut cache = MemoryCache::new();

    kegg.list(&mut cache, "pathway", None).unwrap();
    let rows = kegg.list_rows(&mut cache, "pathway", None).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(kegg.transport().call_count(), 1);
}

#[test]
fn test_not_found_fails_and_leaves_cache_empty() {
    let transport = MockTransport::new().fail(url("get/cpd:C99999"), 404, "Not Found");
    let kegg = Kegg::with_transport(transport);
    let mut cache = MemoryCache::new();

    let err = kegg.get(&mut cache, "cpd:C99999", None, true).unwrap_err();

    match err {
        Error::Transport { status, reason, .. } => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!cache.contains(&url("get/cpd:C99999")));

    // A later attempt still goes to the network.
    let _ = kegg.get(&mut cache, "cpd:C99999", None, true);
    assert_eq!(kegg.transport().call_count(), 2);
}

#[test]
fn test_connection_failure_is_network_error() {
    let transport = MockTransport::new().unreachable(url("list/pathway"), "connection refused");
    let kegg = Kegg::with_transport(transport);
    let mut cache = MemoryCache::new();

    let err = kegg.list(&mut cache, "pathway", None).unwrap_err();

    assert!(matches!(err, Error::Network(_)));
    assert!(cache.is_empty());
}

#[test]
fn test_parse_failure_keeps_fetched_body_cached() {
    let transport = MockTransport::new().respond(url("get/br:bad"), "Bsub\n");
    let kegg = Kegg::with_transport(transport);
    let mut cache = MemoryCache::new();

    assert!(matches!(
        kegg.get_brite(&mut cache, "br:bad"),
        Err(Error::MalformedHierarchy { .. })
    ));
    assert!(cache.contains(&url("get/br:bad")));
}

#[test]
fn test_custom_base_url_is_used_for_requests_and_cache_keys() {
    let transport =
        MockTransport::new().respond("http://mirror.local/list/pathway", "path:map00010\tGlycolysis\n");
    let kegg = Kegg::with_transport(transport).with_base_url("http://mirror.local/");
    let mut cache = MemoryCache::new();

    kegg.list(&mut cache, "pathway", None).unwrap();

    assert!(cache.contains("http://mirror.local/list/pathway"));
}
