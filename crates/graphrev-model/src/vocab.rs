//! Vocabulary IRIs used by the revision subsystem.

/// Revision/dataset management namespace.
pub const WSF_NS: &str = "http://purl.org/ontology/wsf#";

pub const WSF_REVISION: &str = "http://purl.org/ontology/wsf#Revision";
pub const WSF_REVISION_URI: &str = "http://purl.org/ontology/wsf#revisionUri";
pub const WSF_FROM_DATASET: &str = "http://purl.org/ontology/wsf#fromDataset";
pub const WSF_REVISION_TIME: &str = "http://purl.org/ontology/wsf#revisionTime";
pub const WSF_PERFORMER: &str = "http://purl.org/ontology/wsf#performer";
pub const WSF_REVISION_STATUS: &str = "http://purl.org/ontology/wsf#revisionStatus";

// Lifecycle status values
pub const WSF_PUBLISHED: &str = "http://purl.org/ontology/wsf#published";
pub const WSF_ARCHIVE: &str = "http://purl.org/ontology/wsf#archive";
pub const WSF_EXPERIMENTAL: &str = "http://purl.org/ontology/wsf#experimental";
pub const WSF_PRE_RELEASE: &str = "http://purl.org/ontology/wsf#pre_release";
pub const WSF_STAGING: &str = "http://purl.org/ontology/wsf#staging";
pub const WSF_HARVESTING: &str = "http://purl.org/ontology/wsf#harvesting";
pub const WSF_UNSPECIFIED: &str = "http://purl.org/ontology/wsf#unspecified";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
pub const RDF_SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
pub const RDF_PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
pub const RDF_OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";

pub const DCTERMS_IS_PART_OF: &str = "http://purl.org/dc/terms/isPartOf";

pub const IRON_PREF_LABEL: &str = "http://purl.org/ontology/iron#prefLabel";
pub const IRON_ALT_LABEL: &str = "http://purl.org/ontology/iron#altLabel";
pub const IRON_PREF_URL: &str = "http://purl.org/ontology/iron#prefURL";
pub const IRON_DESCRIPTION: &str = "http://purl.org/ontology/iron#description";

pub const CS_CHANGESET: &str = "http://purl.org/vocab/changeset/schema#ChangeSet";
pub const CS_SUBJECT_OF_CHANGE: &str = "http://purl.org/vocab/changeset/schema#subjectOfChange";
pub const CS_CREATED_DATE: &str = "http://purl.org/vocab/changeset/schema#createdDate";
pub const CS_REMOVAL: &str = "http://purl.org/vocab/changeset/schema#removal";
pub const CS_ADDITION: &str = "http://purl.org/vocab/changeset/schema#addition";

pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

/// Predicates that only exist on revisions and never on the live record.
pub const REVISION_META_PREDICATES: [&str; 5] = [
    WSF_REVISION_URI,
    WSF_FROM_DATASET,
    WSF_REVISION_TIME,
    WSF_PERFORMER,
    WSF_REVISION_STATUS,
];

/// Display-only predicates ignored when two revisions are compared.
pub const DIFF_EXCLUDED_PREDICATES: [&str; 5] = [
    IRON_PREF_LABEL,
    IRON_ALT_LABEL,
    IRON_PREF_URL,
    IRON_DESCRIPTION,
    RDF_TYPE,
];

/// Predicates that define a reification node rather than describe it.
pub const REIFICATION_PREDICATES: [&str; 4] = [RDF_TYPE, RDF_SUBJECT, RDF_PREDICATE, RDF_OBJECT];

/// Name of the revisions graph paired with `dataset`.
///
/// `http://ex.org/ds/` and `http://ex.org/ds` both map to
/// `http://ex.org/ds/revisions/`.
pub fn revisions_graph(dataset: &str) -> String {
    format!("{}/revisions/", dataset.trim_end_matches('/'))
}
