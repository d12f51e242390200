use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 归一化正则，按 normalize_script 中的固定顺序使用
    pub static ref NORMALIZER_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        // CR/CRLF 统一为 \n
        map.insert("standardizer", Regex::new(r"\r\n|\r").unwrap());
        // 独占一行的注释定界符前后补换行，使其自成一块
        map.insert("boneyard_isolate", Regex::new(r"(?m)^(/\*|\*/)$").unwrap());
        // 去掉整个文档首尾的空行
        map.insert("cleaner", Regex::new(r"^\n+|\n+$").unwrap());
        // 去掉行首的制表符串和3个以上的空格串
        map.insert("whitespacer", Regex::new(r"(?m)^(?:\t+| {3,})").unwrap());
        // 块分隔: 两个以上连续换行
        map.insert("splitter", Regex::new(r"\n{2,}").unwrap());
        map
    };

    // 块内共享正则
    pub static ref TOKEN_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert(
            "title_page",
            Regex::new(r"(?im)^[ \t]*(?:title|credit|authors?|format|source|notes|draft date|date|contact|copyright):").unwrap(),
        );
        map.insert(
            "title_entry",
            Regex::new(r"(?i)^[ \t]*(title|credit|authors?|format|source|notes|draft date|date|contact|copyright):(.*)").unwrap(),
        );
        // 场景标题末尾的 #N# 编号后缀
        map.insert("scene_number", Regex::new(r"\s*#([^#]+)#\s*$").unwrap());
        map.insert("parenthetical", Regex::new(r"^\(.+\)$").unwrap());
        // 对话内容按"整行括号组+换行"切分
        map.insert("parenthetical_split", Regex::new(r"(\(.+\))\n+").unwrap());
        map
    };
}
