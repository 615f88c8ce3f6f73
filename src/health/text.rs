// SPDX-License-Identifier: MIT
//! Localized text lookup.
//!
//! Checks never embed display strings; they resolve keys through a
//! [`TextService`] injected at construction. Unknown keys echo the key
//! itself, which is also what the test stub relies on.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Ambient text lookup capability.
pub trait TextService: Send + Sync {
    fn localize(&self, key: &str) -> String;
}

/// Built-in English texts for every key the shipped checks use.
pub struct EnglishTextService;

impl TextService for EnglishTextService {
    fn localize(&self, key: &str) -> String {
        TEXTS.get(key).map(|s| (*s).to_string()).unwrap_or_else(|| key.to_string())
    }
}

/// A stub that echoes the key — lets tests assert on keys instead of prose.
pub struct KeyEchoTextService;

impl TextService for KeyEchoTextService {
    fn localize(&self, key: &str) -> String {
        key.to_string()
    }
}

static TEXTS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| TABLE.iter().copied().collect());

#[rustfmt::skip]
const TABLE: &[(&str, &str)] = &[
    // robots.txt
    ("robotsCheck/success", "A robots.txt file is present at the site root."),
    ("robotsCheck/failed", "No robots.txt file was found at the site root."),
    ("robotsCheck/rectifyName", "Add a default robots.txt file"),
    ("robotsCheck/rectifyDescription", "Create a robots.txt file that disallows crawling of the administrative and system folders."),

    // 500 error page
    ("serverErrorPageCheck/success", "A 500.html error page is present at the site root."),
    ("serverErrorPageCheck/failed", "No 500.html error page was found at the site root."),
    ("serverErrorPageCheck/rectifyName", "Add a default 500.html page"),
    ("serverErrorPageCheck/rectifyDescription", "Create a minimal 500.html page to show when an internal server error occurs."),

    // Custom errors configuration
    ("customErrorsCheck/customErrorsSuccess", "The customErrors element is switched on and redirects to ~/500.html."),
    ("customErrorsCheck/customErrorsFailed", "The customErrors element is missing or not configured with mode \"On\" and a ~/500.html redirect."),
    ("customErrorsCheck/customErrorsRectifyName", "Configure the customErrors element"),
    ("customErrorsCheck/customErrorsRectifyDescription", "Set mode=\"On\" and defaultRedirect=\"~/500.html\" on the customErrors element, creating it if necessary."),
    ("customErrorsCheck/errorElementsSuccess", "Custom error pages are registered for both 404 and 500 responses."),
    ("customErrorsCheck/errorElementsFailed", "No error elements are registered under customErrors."),
    ("customErrorsCheck/error404ElementFailed", "No 404 error element is registered under customErrors."),
    ("customErrorsCheck/error500ElementFailed", "No 500 error element is registered under customErrors."),
    ("customErrorsCheck/missing404ElementRectifyName", "Add the 404 error element"),
    ("customErrorsCheck/missing404ElementRectifyDescription", "Register an error element for 404 responses under customErrors."),
    ("customErrorsCheck/missing500ElementRectifyName", "Add the 500 error element"),
    ("customErrorsCheck/missing500ElementRectifyDescription", "Register an error element for 500 responses under customErrors."),
    ("customErrorsCheck/error404ElementAdded", "A 404 error element has been added under customErrors."),
    ("customErrorsCheck/error500ElementAdded", "A 500 error element has been added under customErrors."),
    ("customErrorsCheck/httpErrorsSuccess", "The httpErrors element is present with errorMode \"Custom\"."),
    ("customErrorsCheck/httpErrorsFailed", "No httpErrors element was found under system.webServer."),
    ("customErrorsCheck/httpErrorsErrorModeFailed", "The httpErrors element does not set errorMode to \"Custom\"."),
    ("customErrorsCheck/missingHttpErrorsRectifyName", "Add the httpErrors element"),
    ("customErrorsCheck/missingHttpErrorsRectifyDescription", "Create an httpErrors element with errorMode=\"Custom\" under system.webServer."),
    ("customErrorsCheck/httpErrorsAdded", "An httpErrors element with errorMode=\"Custom\" has been added; its child elements still need to be registered."),
    ("customErrorsCheck/httpErrorsErrorModeRectifyName", "Set errorMode to Custom"),
    ("customErrorsCheck/httpErrorsErrorModeRectifyDescription", "Overwrite the errorMode attribute on the httpErrors element with \"Custom\"."),
    ("customErrorsCheck/httpErrorsErrorModeSet", "The errorMode attribute on httpErrors is now \"Custom\"."),
    ("customErrorsCheck/checkChildNodesName", "Check httpErrors child elements"),
    ("customErrorsCheck/checkChildNodesDescription", "Verify that remove and error elements are registered for both 404 and 500 responses."),
    ("customErrorsCheck/childNodesSuccess", "remove and error elements are registered for both 404 and 500 responses."),
    ("customErrorsCheck/childNodesEmpty", "The httpErrors element has no child elements."),
    ("customErrorsCheck/remove404Failed", "No remove element for status code 404 was found under httpErrors."),
    ("customErrorsCheck/remove500Failed", "No remove element for status code 500 was found under httpErrors."),
    ("customErrorsCheck/httpError404Failed", "No error element for status code 404 was found under httpErrors."),
    ("customErrorsCheck/httpError500Failed", "No error element for status code 500 was found under httpErrors."),
    ("customErrorsCheck/missingRemove404RectifyName", "Add the 404 remove element"),
    ("customErrorsCheck/missingRemove404RectifyDescription", "Register a remove element for status code 404 under httpErrors."),
    ("customErrorsCheck/missingRemove500RectifyName", "Add the 500 remove element"),
    ("customErrorsCheck/missingRemove500RectifyDescription", "Register a remove element for status code 500 under httpErrors."),
    ("customErrorsCheck/missingHttpError404RectifyName", "Add the 404 error element"),
    ("customErrorsCheck/missingHttpError404RectifyDescription", "Register an error element for status code 404 under httpErrors."),
    ("customErrorsCheck/missingHttpError500RectifyName", "Add the 500 error element"),
    ("customErrorsCheck/missingHttpError500RectifyDescription", "Register an error element for status code 500 under httpErrors."),
    ("customErrorsCheck/fixAllChildrenName", "Add all httpErrors child elements"),
    ("customErrorsCheck/fixAllChildrenDescription", "Register the remove and error elements for both 404 and 500 responses in one go."),
    ("customErrorsCheck/remove404Added", "A remove element for status code 404 has been added under httpErrors."),
    ("customErrorsCheck/remove500Added", "A remove element for status code 500 has been added under httpErrors."),
    ("customErrorsCheck/httpError404Added", "An error element for status code 404 has been added under httpErrors."),
    ("customErrorsCheck/httpError500Added", "An error element for status code 500 has been added under httpErrors."),
    ("customErrorsCheck/allChildrenAdded", "All four httpErrors child elements are now registered."),
    ("customErrorsCheck/settings404Success", "The error404 node in the CMS settings document points at a content node."),
    ("customErrorsCheck/settings404Placeholder", "The error404 node in the CMS settings document still carries the default id."),
    ("customErrorsCheck/settings404Missing", "No error404 node was found in the CMS settings document."),
    ("customErrorsCheck/settings404RectifyName", "Add the error404 node"),
    ("customErrorsCheck/settings404RectifyDescription", "Create an error404 node under settings/content/errors with a placeholder id to fill in."),
    ("customErrorsCheck/settings404Added", "An error404 node has been added to the CMS settings document."),

    // ReCaptcha key
    ("recaptchaCheck/success", "A ReCaptcha secret key entry is present in appSettings."),
    ("recaptchaCheck/failed", "No ReCaptcha secret key entry was found in appSettings."),
    ("recaptchaCheck/rectifyName", "Add the ReCaptcha key entry"),
    ("recaptchaCheck/rectifyDescription", "Insert an appSettings entry for the ReCaptcha secret with a placeholder value to fill in."),
    ("recaptchaCheck/keyAdded", "A ReCaptcha secret key entry has been added to appSettings; replace the placeholder value with the real key."),

    // Favicon
    ("faviconCheck/success", "The front page markup references a favicon."),
    ("faviconCheck/failed", "The front page markup does not reference a favicon."),
    ("faviconCheck/fetchFailed", "The front page could not be fetched."),

    // HTML language attribute
    ("htmlLangCheck/success", "The html element declares a language: "),
    ("htmlLangCheck/failed", "The html element does not carry a lang attribute."),
    ("htmlLangCheck/fetchFailed", "The front page could not be fetched."),

    // Site map
    ("sitemapCheck/success", "An XML site map is served at /sitemap."),
    ("sitemapCheck/notXml", "The /sitemap response is not served as XML."),
    ("sitemapCheck/failed", "No site map could be fetched from /sitemap."),

    // 404 response
    ("error404ResponseCheck/success", "Unknown paths return a customized 404 page."),
    ("error404ResponseCheck/failed", "Unknown paths still return the default 404 placeholder page."),
    ("error404ResponseCheck/unexpected2xx", "The 404 probe path unexpectedly returned a success response."),
    ("error404ResponseCheck/fetchFailed", "The 404 probe request could not be completed."),

    // Document type icons
    ("documentTypeIconCheck/success", "Every document type has been given an icon."),
    ("documentTypeIconCheck/failed", "Document types still using the default icon: "),

    // Media root
    ("mediaRootCheck/success", "No images are stored directly in the media root."),
    ("mediaRootCheck/failed", "Images are stored directly in the media root; move them into folders."),

    // Image alt text property
    ("imageAltCheck/propertySuccess", "The Image media type has an alt text property."),
    ("imageAltCheck/propertyFailed", "The Image media type has no property for alt text."),
    ("imageAltCheck/mediaTypeMissing", "No media type named \"Image\" exists; this check cannot run."),
    ("imageAltCheck/dataTypeMissing", "No TextBox data type exists to back the alt text property."),
    ("imageAltCheck/propertyAdded", "An Alt Tag property has been added to the Image media type."),
    ("imageAltCheck/valuesSuccess", "Every image has a value for its alt text property."),
    ("imageAltCheck/valuesFailed", "Images without an alt text value: "),
    ("imageAltCheck/checkValuesName", "Check images for alt values"),
    ("imageAltCheck/checkValuesDescription", "Walk the media tree and report images whose alt text property is empty."),
    ("imageAltCheck/fixPropertyName", "Add an alt text property"),
    ("imageAltCheck/fixPropertyDescription", "Create an Alt Tag text property on the Image media type."),

    // Recycle bin
    ("recycleBinCheck/success", "The content and media recycle bins are empty."),
    ("recycleBinCheck/failed", "The recycle bins still contain items."),
    ("recycleBinCheck/emptyName", "Empty the recycle bins"),
    ("recycleBinCheck/emptyDescription", "Permanently delete everything in the content and media recycle bins."),
    ("recycleBinCheck/operatorMissing", "The configured operator user could not be found; nothing was deleted."),
    ("recycleBinCheck/emptied", "The content and media recycle bins have been emptied."),

    // Redirect URL management
    ("redirectUrlCheck/none", "No tracked redirect URLs are registered."),
    ("redirectUrlCheck/present", "Tracked redirect URLs are registered; review and remove the ones no longer needed."),

    // User groups
    ("userGroupsCheck/success", "All required user groups exist."),
    ("userGroupsCheck/failed", "One or more required user groups are missing."),
    ("userGroupsCheck/fixGroupsName", "Create the missing user groups"),
    ("userGroupsCheck/fixGroupsDescription", "Create the Administrators, Marketing, End Users and Third Party groups that are missing."),
    ("userGroupsCheck/groupsCreated", "All required user groups now exist."),
    ("userGroupsCheck/groupMissing", "The group required for this check does not exist: "),
    ("userGroupsCheck/adminSectionsName", "Check Administrators sections"),
    ("userGroupsCheck/adminSectionsDescription", "Verify that the Administrators group has access to every section."),
    ("userGroupsCheck/adminSectionsSuccess", "The Administrators group has access to every section."),
    ("userGroupsCheck/adminSectionsFailed", "The Administrators group does not have access to every section."),
    ("userGroupsCheck/fixSectionsName", "Fix the allowed sections"),
    ("userGroupsCheck/fixAdminSectionsDescription", "Grant the Administrators group access to every section."),
    ("userGroupsCheck/adminSectionsFixed", "The Administrators group now has access to every section."),
    ("userGroupsCheck/marketingSectionsName", "Check Marketing sections"),
    ("userGroupsCheck/marketingSectionsDescription", "Verify that the Marketing group has access to content, media and forms only."),
    ("userGroupsCheck/marketingSectionsSuccess", "The Marketing group has access to content, media and forms only."),
    ("userGroupsCheck/marketingSectionsFailed", "The Marketing group's allowed sections are not content, media and forms."),
    ("userGroupsCheck/fixMarketingSectionsDescription", "Reset the Marketing group's sections to content, media and forms."),
    ("userGroupsCheck/marketingSectionsFixed", "The Marketing group's sections are now content, media and forms."),
    ("userGroupsCheck/endUsersSectionsName", "Check End Users sections"),
    ("userGroupsCheck/endUsersSectionsDescription", "Verify that the End Users group has access to content, media and forms only."),
    ("userGroupsCheck/endUsersSectionsSuccess", "The End Users group has access to content, media and forms only."),
    ("userGroupsCheck/endUsersSectionsFailed", "The End Users group's allowed sections are not content, media and forms."),
    ("userGroupsCheck/fixEndUsersSectionsDescription", "Reset the End Users group's sections to content, media and forms."),
    ("userGroupsCheck/endUsersSectionsFixed", "The End Users group's sections are now content, media and forms."),
    ("userGroupsCheck/thirdPartySectionsName", "Check Third Party sections"),
    ("userGroupsCheck/thirdPartySectionsDescription", "Verify that the Third Party group has access to everything except users and members."),
    ("userGroupsCheck/thirdPartySectionsSuccess", "The Third Party group has access to everything except users and members."),
    ("userGroupsCheck/thirdPartySectionsFailed", "The Third Party group's allowed sections are not everything except users and members."),
    ("userGroupsCheck/fixThirdPartySectionsDescription", "Reset the Third Party group's sections to everything except users and members."),
    ("userGroupsCheck/thirdPartySectionsFixed", "The Third Party group's sections are now everything except users and members."),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_resolves() {
        let text = EnglishTextService;
        assert_eq!(
            text.localize("robotsCheck/failed"),
            "No robots.txt file was found at the site root."
        );
    }

    #[test]
    fn unknown_key_echoes() {
        let text = EnglishTextService;
        assert_eq!(text.localize("nope/missing"), "nope/missing");
    }

    #[test]
    fn table_has_no_duplicate_keys() {
        let mut seen = std::collections::HashSet::new();
        for (key, _) in TABLE {
            assert!(seen.insert(*key), "duplicate text key: {key}");
        }
    }
}
