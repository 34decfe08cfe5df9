//! Built-in style tables and defaults.
//!
//! These are the values used when no config file or environment override
//! replaces them. The pipeline never reads this module directly; it receives
//! the tables through [`StyleContext`](crate::pipeline::StyleContext).

/// Indent unit repeated once per nesting level.
pub const INDENT: &str = "    ";

/// Maximum run of consecutive blank lines kept in the output.
pub const MAX_CONSECUTIVE_BLANK_LINES: usize = 1;

/// Directory tidied scripts are written to when no other location is given.
pub const OUTDIR: &str = "tidy";

/// Part label used when the caller does not name one.
pub const PART: &str = "Unknown";

/// Control keywords, in the order they are tried.
const KEYWORDS: &[&str] = &["IF", "ELSEIF", "ELSE", "ENDIF", "WHILE", "END", "BREAK"];

/// Operators to pad. Longest match wins at use time, so order only matters
/// between operators of equal length.
const OPERATORS: &[&str] = &[
    "=", "<>", "<=", ">=", "<", ">", "@=", "@<>", "@<=", "@>=", "@<", "@>",
];

/// Reserved TurboIntegrator function names in canonical case.
const FUNCTION_NAMES: &[&str] = &[
    // ASCII and text output
    "ASCIIDelete",
    "ASCIIOutput",
    "TextOutput",
    "SetInputCharacterSet",
    "SetOutputCharacterSet",
    "SetOutputEscapeDoubleQuote",
    // Attributes
    "AttrDelete",
    "AttrInsert",
    "AttrPutN",
    "AttrPutS",
    "AttrN",
    "AttrS",
    "CellAttrN",
    "CellAttrS",
    "CubeAttrN",
    "CubeAttrS",
    "CubeAttrPutN",
    "CubeAttrPutS",
    "DimensionAttrN",
    "DimensionAttrS",
    "DimensionAttrPutN",
    "DimensionAttrPutS",
    "ElementAttrN",
    "ElementAttrS",
    "ElementAttrPutN",
    "ElementAttrPutS",
    "ElementAttrInsert",
    "ElementAttrDelete",
    // Chores
    "ChoreQuit",
    "SetChoreVerboseMessages",
    // Cubes
    "CubeClearData",
    "CubeCreate",
    "CubeDestroy",
    "CubeExists",
    "CubeGetLogChanges",
    "CubeSetLogChanges",
    "CubeProcessFeeders",
    "CubeRuleDestroy",
    "CubeSaveData",
    "CubeUnload",
    "CubeSetConnParams",
    "RuleLoadFromFile",
    // Cells
    "CellGetN",
    "CellGetS",
    "CellIncrementN",
    "CellIsUpdateable",
    "CellPutN",
    "CellPutS",
    "CellPutProportionalSpread",
    // Dimensions
    "DimensionCreate",
    "DimensionDeleteAllElements",
    "DimensionDestroy",
    "DimensionElementComponentAdd",
    "DimensionElementComponentAddDirect",
    "DimensionElementComponentDelete",
    "DimensionElementComponentDeleteDirect",
    "DimensionElementDelete",
    "DimensionElementDeleteDirect",
    "DimensionElementInsert",
    "DimensionElementInsertDirect",
    "DimensionElementPrincipalName",
    "DimensionExists",
    "DimensionSortOrder",
    "DimensionTimeLastUpdated",
    "DimensionTopElementInsert",
    "DimensionTopElementInsertDirect",
    "DimensionUpdateDirect",
    // Hierarchies
    "HierarchyCreate",
    "HierarchyDeleteAllElements",
    "HierarchyDestroy",
    "HierarchyElementComponentAdd",
    "HierarchyElementDelete",
    "HierarchyElementInsert",
    "HierarchyExists",
    "HierarchySubsetCreate",
    "HierarchySubsetDestroy",
    "HierarchySubsetElementInsert",
    "HierarchySubsetExists",
    "HierarchySubsetMDXSet",
    // Dimension and element information
    "DIMIX",
    "DIMNM",
    "DIMSIZ",
    "DNEXT",
    "DNLEV",
    "DTYPE",
    "ELCOMP",
    "ELCOMPN",
    "ELISANC",
    "ELISCOMP",
    "ELISPAR",
    "ELLEV",
    "ELPAR",
    "ELPARN",
    "ELWEIGHT",
    "TABDIM",
    // Subsets
    "SubsetAliasSet",
    "SubsetCreate",
    "SubsetCreateByMDX",
    "SubsetDeleteAllElements",
    "SubsetDestroy",
    "SubsetElementDelete",
    "SubsetElementInsert",
    "SubsetExists",
    "SubsetExpandAboveSet",
    "SubsetFormatStyleSet",
    "SubsetGetElementName",
    "SubsetGetSize",
    "SubsetIsAllSet",
    "SubsetMDXSet",
    // Views
    "PublishView",
    "ViewColumnDimensionSet",
    "ViewColumnSuppressZeroesSet",
    "ViewConstruct",
    "ViewCreate",
    "ViewCreateByMDX",
    "ViewDestroy",
    "ViewExists",
    "ViewExtractSkipCalcsSet",
    "ViewExtractSkipRuleValuesSet",
    "ViewExtractSkipZeroesSet",
    "ViewMDXSet",
    "ViewRowDimensionSet",
    "ViewRowSuppressZeroesSet",
    "ViewSubsetAssign",
    "ViewSuppressZeroesSet",
    "ViewTitleDimensionSet",
    "ViewTitleElementSet",
    "ViewZeroOut",
    // Process control
    "ExecuteCommand",
    "ExecuteProcess",
    "GetProcessErrorFileDirectory",
    "GetProcessErrorFilename",
    "GetProcessName",
    "ItemReject",
    "ItemSkip",
    "LogOutput",
    "ProcessBreak",
    "ProcessError",
    "ProcessQuit",
    // Server and security
    "AddClient",
    "AddGroup",
    "AssignClientPassword",
    "AssignClientToGroup",
    "BatchUpdateFinish",
    "BatchUpdateStart",
    "DeleteAllPersistentFeeders",
    "DeleteClient",
    "DeleteGroup",
    "DisableBulkLoadMode",
    "EnableBulkLoadMode",
    "RemoveClientFromGroup",
    "SaveDataAll",
    "SecurityRefresh",
    "ServerShutdown",
    // Variables
    "NumericGlobalVariable",
    "NumericSessionVariable",
    "StringGlobalVariable",
    "StringSessionVariable",
    // ODBC
    "ODBCClose",
    "ODBCOpen",
    "ODBCOpenEx",
    "ODBCOutput",
    "SetODBCUnicodeInterface",
    // Files
    "FileExists",
    "WildcardFileSearch",
    // Strings
    "NumberToString",
    "NumberToStringEx",
    "StringToNumber",
    "StringToNumberEx",
    "CAPIT",
    "CHAR",
    "CODE",
    "DELET",
    "Expand",
    "FILL",
    "INSRT",
    "LONG",
    "LOWER",
    "NUMBR",
    "SCAN",
    "SUBST",
    "TRIM",
    "UPPER",
    // Dates and times
    "DayNo",
    "TIMST",
    "TIMVL",
    "TODAY",
    // Arithmetic
    "ROUNDP",
    "ISUND",
    "SQRT",
];

pub fn keywords() -> Vec<String> {
    owned_table(KEYWORDS)
}

pub fn function_names() -> Vec<String> {
    owned_table(FUNCTION_NAMES)
}

pub fn operators() -> Vec<String> {
    owned_table(OPERATORS)
}

fn owned_table(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tables_have_no_duplicates() {
        for table in [KEYWORDS, OPERATORS, FUNCTION_NAMES] {
            let unique: HashSet<String> = table.iter().map(|s| s.to_ascii_uppercase()).collect();
            assert_eq!(unique.len(), table.len());
        }
    }

    #[test]
    fn function_table_is_large() {
        assert!(function_names().len() >= 150);
    }

    #[test]
    fn keywords_cover_control_flow() {
        let kw = keywords();
        for k in ["IF", "ELSEIF", "ELSE", "WHILE", "END"] {
            assert!(kw.contains(&k.to_string()));
        }
    }
}
