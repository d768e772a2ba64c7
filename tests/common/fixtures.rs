/// Shared layout: common head entries, header, footer and a trailing script.
pub const LAYOUT: &str = r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
    <meta charset="UTF-8"/>
    <link rel="stylesheet" href="../css/common.css"/>
    <title>Layout</title>
</head>
<body>
    <header id="header"><a href="@{/}">Harbor</a></header>
    <footer id="footer"><small>harbor footer</small></footer>
    <script src="../js/common.js"></script>
</body>
</html>"#;

/// A member list page with a table, error placeholders and relative paths.
pub const MEMBER_LIST: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8"/>
    <link rel="stylesheet" href="../../css/member.css"/>
    <title>Member List</title>
</head>
<body>
    <header id="header">designer header</header>
    <div data-errors="all"></div>
    <form action="@{/member/list/}">
        <input type="text" name="memberName"/>
        <span data-errors="memberName"></span>
        <select name="status"><option value="">-</option><option data-cls="MemberStatus">status</option></select>
    </form>
    <table>
        <tbody id="members">
            <tr><td>1</td><td>Sample</td><td><a href="@{/member/edit/}">edit</a></td></tr>
            <tr><td>2</td><td>Sample</td><td><a href="@{/member/edit/}">edit</a></td></tr>
        </tbody>
    </table>
    <footer id="footer">designer footer</footer>
</body>
</html>"#;

/// A template with no header or footer, for tests that leave the layout out.
pub const PLAIN: &str = "<!DOCTYPE html>\n<html>\n<body>\n    <p id=\"sea\">static</p>\n</body>\n</html>";

pub struct Member {
    pub id: u32,
    pub name: &'static str,
}

pub fn members() -> Vec<Member> {
    vec![
        Member { id: 3, name: "Stojkovic" },
        Member { id: 7, name: "Vela" },
        Member { id: 9, name: "Kawasaki" },
    ]
}
