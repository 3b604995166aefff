//! Preamble and postamble placed around the combined tweak body.
//!
//! The restore point fallback and the reboot countdown only exist as text in
//! the generated script. Nothing here executes them.

use crate::settings::{ScriptOptions, Settings};

const PREAMBLE: &str = "\
#Requires -Version 5.1
# Generated by tweakforge. Review before running with administrative rights.
$ErrorActionPreference = 'Stop'";

const RESTORE_POINT: &str = "\
try {
    Checkpoint-Computer -Description 'tweakforge' -RestorePointType 'MODIFY_SETTINGS'
    Write-Host 'Restore point created.'
} catch {
    Write-Warning \"Could not create a restore point: $($_.Exception.Message)\"
    $answer = Read-Host 'Continue without a restore point? (y/N)'
    if ($answer -notmatch '^[Yy]') {
        Write-Host 'Aborted. No changes were made.'
        exit 1
    }
}";

const APPLYING: &str = "Write-Host 'Applying tweaks...'";

// Native tools report failure through the exit code only, so it is reset
// before the body and checked after it.
const BODY_OPEN: &str = "\
$tweakforgeError = $null
$global:LASTEXITCODE = 0
try {";

const BODY_CLOSE: &str = "\
} catch {
    $tweakforgeError = $_
}
if ($null -eq $tweakforgeError -and $global:LASTEXITCODE -ne 0) {
    $tweakforgeError = \"A native command exited with code $global:LASTEXITCODE.\"
}";

const SUCCESS_OPEN: &str = "\
if ($null -eq $tweakforgeError) {
    Write-Host 'All tweaks applied successfully.' -ForegroundColor Green";

// Hosts without a raw console (ISE, redirected input) cannot poll keys. They
// read one line on a separate runspace and wait no longer than the time left.
const COUNTDOWN: &str = "\
    $answer = $null
    Write-Host \"Restart now? Press Y to restart, N to restart later. Restarting in $timeout seconds...\"
    $deadline = (Get-Date).AddSeconds($timeout)
    try {
        while ((Get-Date) -lt $deadline) {
            if ([Console]::KeyAvailable) {
                $answer = [string][Console]::ReadKey($true).KeyChar
                break
            }
            Start-Sleep -Milliseconds 200
        }
    } catch {
        Write-Host 'Type Y or N and press Enter.'
        $reader = [PowerShell]::Create().AddScript('[Console]::In.ReadLine()')
        $pending = $reader.BeginInvoke()
        $remaining = [Math]::Max(0, ($deadline - (Get-Date)).TotalMilliseconds)
        if ($pending.AsyncWaitHandle.WaitOne([int]$remaining)) {
            $answer = $reader.EndInvoke($pending) | Select-Object -First 1
            $reader.Dispose()
        }
        $remaining = [Math]::Max(0, ($deadline - (Get-Date)).TotalMilliseconds)
        if ($null -eq $answer -and $remaining -gt 0) {
            Start-Sleep -Milliseconds ([int]$remaining)
        }
    }
    if ($answer -match '^[Nn]') {
        Write-Host 'Restart skipped. Reboot later to finish applying changes.'
    } else {
        Restart-Computer -Force
    }";

const FAILURE: &str = "\
} else {
    Write-Host 'Applying tweaks failed.' -ForegroundColor Red
    Write-Host \"$tweakforgeError\" -ForegroundColor Red
    exit 1
}";

/// Wraps a combined body with the guarded preamble and the reporting
/// postamble.
///
/// The body is emitted byte for byte, without re-indenting, so here-strings
/// and other column-sensitive constructs survive. The restore point block is
/// emitted only when [`Settings::auto_create_restore_point`] is set. The
/// "applying" status line is always present.
#[must_use]
pub fn wrap_script(body: &str, settings: Settings, options: ScriptOptions) -> String {
    let mut sections: Vec<String> = vec![PREAMBLE.to_owned()];
    if settings.auto_create_restore_point {
        sections.push(RESTORE_POINT.to_owned());
    }
    sections.push(APPLYING.to_owned());
    sections.push(format!("{BODY_OPEN}\n{body}\n{BODY_CLOSE}"));
    sections.push(format!(
        "{SUCCESS_OPEN}\n    $timeout = {}\n{COUNTDOWN}\n{FAILURE}",
        options.reboot_countdown_secs
    ));
    sections.join("\n\n")
}
