//! Shared markup fixtures.
//!
//! Each fixture is an LF document. Use [`to_crlf`] for the CRLF variant. Line
//! numbers in the docs are 1-based.

/// Four JavaScript scripts and one template script.
///
/// `console.` appears at 8:7, 14:7, 20:3 and 23:11, plus once inside the
/// `text/template` script on line 25.
pub const SIMPLE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Simple</title>
  <script>
    function greet() {
      console.log("hello");
    }
  </script>
</head>
<body>
  <script type="text/javascript">
      console.log("indented more");
  </script>
  <div>
<script>
  // script at column 1
  var answer = 42;
  console.log(answer);
</script>
  </div>
  <script>console.log("same line");</script>
  <p>text</p>
  <script type="text/template">console.log("not javascript")</script>
</body>
</html>
"#;

/// Three scripts whose opening tags sit at indentation 0, 2 and 8, each with
/// content indented two more than its tag and a nested line two further.
///
/// Content lines: 5-7, 12-14 and 19-21.
pub const INDENT_SETTING_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<script>
function first() {
  return 1;
}
</script>
</head>
<body>
  <script>
    function second() {
      return 2;
    }
  </script>
  <div>
    <div>
        <script>
          function third() {
            return 3;
          }
        </script>
    </div>
  </div>
</body>
</html>
"#;

/// A script whose tag is indented 2 and whose content is indented 4, except
/// line 9, indented 2, and line 7, indented 6.
pub const REPORT_BAD_INDENT_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
  <script>
    var a = 1;
    if (a) {
      a++;
    }
  var b = 2;
    var c = 3;
  </script>
</body>
</html>
"#;

/// A CDATA-wrapped script in a `.html` file. `<![CDATA[` is at 5:5 and
/// `console.` at 6:7.
pub const CDATA_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <script>
    <![CDATA[
      console.log("cdata");
    ]]>
  </script>
</head>
</html>
"#;

/// A CDATA-wrapped script in an XHTML document. `<![CDATA[` is at 7:5,
/// `console.` at 9:9, and line 8 holds a `<` comparison.
pub const CDATA_XHTML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <title>CDATA</title>
  <script type="text/javascript">
    <![CDATA[
      if (1 < 2) {
        console.log("cdata");
      }
    ]]>
  </script>
</head>
</html>
"#;

/// Doubled semicolons on lines 5 and 7.
pub const REMAP_FIX_RANGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
  <script>
    var a = 1;;
    function b() {
      return a;;
    }
  </script>
</body>
</html>
"#;

/// The same document with CRLF line breaks.
pub fn to_crlf(text: &str) -> String {
    text.replace('\n', "\r\n")
}
