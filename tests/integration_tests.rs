use anyhow::{Result, bail};
use lustra::list::list_operand;
use lustra::options::{ListOptions, Resolution, resolve_args};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};

use test_helpers::{ListingFixture, render_listing};

/// Integration tests for the lustra library
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn resolve_list(invocation: &str, args: &[&str]) -> Result<(ListOptions, Vec<PathBuf>)> {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        match resolve_args(invocation, &args)? {
            Resolution::List { options, operands } => Ok((options, operands)),
            Resolution::Version => bail!("expected a listing resolution"),
        }
    }

    /// Resolve arguments and list the result, the way the binary drives it.
    #[test]
    fn test_workflow_resolve_then_list() -> Result<()> {
        let fixture = ListingFixture::setup()?;
        let operand_arg = fixture.path().display().to_string();

        let (options, operands) = resolve_list("ls", &["-t", &operand_arg])?;

        assert!(options.show_symlink && options.show_size && options.show_time);
        assert!(!options.recursive);
        assert_eq!(operands, vec![PathBuf::from(&operand_arg)]);

        let lines = render_listing(&operands[0], &options)?;

        assert_eq!(lines.len(), 3, "unexpected listing: {:?}", lines);
        for line in &lines {
            assert!(line.contains("\tsize:"), "missing size field: {}", line);
            assert!(line.contains("\tmtime:"), "missing mtime field: {}", line);
        }

        Ok(())
    }

    /// With no operands the current directory is listed, in absolute form.
    #[test]
    #[serial]
    fn test_workflow_default_operand_is_the_current_directory() -> Result<()> {
        let fixture = ListingFixture::setup()?;
        let previous = env::current_dir()?;
        env::set_current_dir(fixture.path())?;

        // Restore the working directory before the fixture is removed,
        // whatever the listing did.
        let run = (|| -> Result<Vec<String>> {
            let (options, operands) = resolve_list("ls", &[])?;
            assert_eq!(operands, vec![PathBuf::from(".")]);
            render_listing(&operands[0], &options)
        })();
        env::set_current_dir(previous)?;

        let lines = run?;
        assert_eq!(lines.len(), 3, "unexpected listing: {:?}", lines);
        for line in &lines {
            let name = line.split('\t').next().unwrap_or(line);
            assert!(Path::new(name).is_absolute(), "relative path leaked: {}", line);
        }

        Ok(())
    }

    /// The version literal only counts when it is the whole argument vector.
    #[test]
    fn test_workflow_version_literal() -> Result<()> {
        let bare = vec!["version".to_string()];
        assert_eq!(resolve_args("ls", &bare)?, Resolution::Version);

        let with_more = vec!["version".to_string(), ".".to_string()];
        match resolve_args("ls", &with_more)? {
            Resolution::List { operands, .. } => {
                assert_eq!(operands, vec![PathBuf::from("version"), PathBuf::from(".")]);
            }
            Resolution::Version => bail!("two arguments must fall through to listing"),
        }

        Ok(())
    }

    /// A failed operand does not disturb the output of the ones around it.
    #[test]
    fn test_workflow_failed_operand_leaves_later_output_intact() -> Result<()> {
        let fixture = ListingFixture::setup()?;
        let options = ListOptions::default();
        let mut out = Vec::new();

        let missing = fixture.entry("absent");
        let mut failures = 0;
        for operand in [missing.as_path(), fixture.path()] {
            if list_operand(operand, &options, &mut out).is_err() {
                failures += 1;
            }
        }

        assert_eq!(failures, 1);
        let text = String::from_utf8(out)?;
        assert_eq!(text.lines().count(), 3, "unexpected output: {:?}", text);

        Ok(())
    }

    /// A recursive profile with the content identifier column switched on.
    #[test]
    fn test_workflow_recursive_with_content_ids() -> Result<()> {
        let fixture = ListingFixture::setup()?;
        let operand_arg = fixture.path().display().to_string();

        let (options, operands) = resolve_list("llr", &["-c", &operand_arg])?;
        assert!(options.recursive && options.show_cid && options.show_mode);

        let lines = render_listing(&operands[0], &options)?;

        assert_eq!(lines.len(), 5, "unexpected listing: {:?}", lines);

        // Only regular files carry an identifier.
        let with_cid = lines.iter().filter(|line| line.contains("\tcid:bafkrei")).count();
        assert_eq!(with_cid, 3, "unexpected listing: {:?}", lines);
        for line in lines.iter().filter(|line| line.contains("\tsize:dir")) {
            assert!(!line.contains("\tcid:"), "directory with an identifier: {}", line);
        }

        Ok(())
    }

    /// `-1` strips a long profile back to bare names.
    #[test]
    fn test_workflow_names_only_override() -> Result<()> {
        let fixture = ListingFixture::setup()?;
        let operand_arg = fixture.entry("notes.txt").display().to_string();

        let (options, operands) = resolve_list("ll", &["-1", &operand_arg])?;
        let lines = render_listing(&operands[0], &options)?;

        assert_eq!(lines, vec![operand_arg]);

        Ok(())
    }
}
