/// Built-in spreadsheet function names offered as suggestions.
///
/// Only the names matter here; evaluation happens in the backend.
pub const FUNCTION_NAMES: &[&str] = &[
    "ABS",
    "AND",
    "AVG",
    "AVERAGE",
    "AVERAGEIF",
    "AVERAGEIFS",
    "BOOL",
    "CEILING",
    "CHOOSE",
    "CLEAN",
    "CONCAT",
    "CONCATENATE",
    "CORR",
    "COUNT",
    "COUNTA",
    "COUNTBLANK",
    "COUNTIF",
    "COUNTIFS",
    "DATEVALUE",
    "DATE",
    "DAY",
    "DAYS",
    "EDATE",
    "EOMONTH",
    "EXP",
    "FILLNAN",
    "FIND",
    "FLOAT",
    "FLOOR",
    "HLOOKUP",
    "HOUR",
    "IF",
    "IFERROR",
    "IFNA",
    "IFS",
    "INDEX",
    "INT",
    "ISBLANK",
    "ISERROR",
    "ISNUMBER",
    "ISTEXT",
    "KURT",
    "LEFT",
    "LEN",
    "LN",
    "LOG",
    "LOOKUP",
    "LOWER",
    "MATCH",
    "MAX",
    "MEDIAN",
    "MID",
    "MIN",
    "MINUTE",
    "MOD",
    "MONTH",
    "NOT",
    "NOW",
    "OFFSET",
    "OR",
    "POWER",
    "PROPER",
    "QUARTER",
    "RAND",
    "RANK",
    "REPLACE",
    "RIGHT",
    "ROUND",
    "ROUNDDOWN",
    "ROUNDUP",
    "SECOND",
    "SKEW",
    "SORT",
    "SQRT",
    "STDEV",
    "STRTODATE",
    "SUBSTITUTE",
    "SUM",
    "SUMIF",
    "SUMIFS",
    "SUMPRODUCT",
    "TEXT",
    "TODAY",
    "TRIM",
    "TRUE",
    "TYPE",
    "UNIQUE",
    "UPPER",
    "VALUE",
    "VAR",
    "VLOOKUP",
    "WEEK",
    "WEEKDAY",
    "XLOOKUP",
    "YEAR",
];
